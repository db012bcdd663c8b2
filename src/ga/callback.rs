//! Hooks into the run loop.

use super::runner::GeneticAlgorithm;

/// Observer notified at the boundaries of a run.
///
/// Every hook receives the algorithm itself, so a callback may inspect
/// the population, query [`best`](GeneticAlgorithm::best) or request a
/// [`stop`](GeneticAlgorithm::stop). All hooks default to no-ops.
pub trait Callback<C> {
    /// After [`initialize`](GeneticAlgorithm::initialize) filled the population.
    fn on_algorithm_begin(&mut self, _ga: &mut GeneticAlgorithm<C>) {}

    /// Before each step.
    fn on_step_begin(&mut self, _ga: &mut GeneticAlgorithm<C>) {}

    /// After each step, once the generation counter was incremented.
    fn on_step_end(&mut self, _ga: &mut GeneticAlgorithm<C>) {}

    /// From [`finalize`](GeneticAlgorithm::finalize).
    fn on_algorithm_end(&mut self, _ga: &mut GeneticAlgorithm<C>) {}
}

/// Logs run progress through `tracing` at info level.
///
/// Step-level lines are emitted every `every` generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingCallback {
    every: usize,
}

impl TracingCallback {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for TracingCallback {
    fn default() -> Self {
        TracingCallback::new(1)
    }
}

impl<C> Callback<C> for TracingCallback {
    fn on_algorithm_begin(&mut self, ga: &mut GeneticAlgorithm<C>) {
        tracing::info!(
            population_size = ga.population_size(),
            offspring_size = ga.offspring_size(),
            selection_size = ga.selection_size(),
            "genetic algorithm started"
        );
    }

    fn on_step_end(&mut self, ga: &mut GeneticAlgorithm<C>) {
        let generation = ga.generation();
        if generation % self.every != 0 {
            return;
        }
        if let Ok(best) = ga.best().and_then(|g| g.fitness()) {
            tracing::info!(generation, best_fitness = best, "step finished");
        }
    }

    fn on_algorithm_end(&mut self, ga: &mut GeneticAlgorithm<C>) {
        let best = ga.best().and_then(|g| g.fitness()).ok();
        tracing::info!(
            generations = ga.generation(),
            best_fitness = ?best,
            "genetic algorithm finished"
        );
    }
}
