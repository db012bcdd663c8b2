//! Stop conditions for the evolutionary loop.

use super::runner::GeneticAlgorithm;

/// Decides whether the run loop terminates.
///
/// Checked once after every completed step. The first step always runs.
pub trait StopCondition<C> {
    fn should_stop(&self, ga: &GeneticAlgorithm<C>) -> bool;
}

/// Stops once `generation >= steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumSteps(pub usize);

impl<C> StopCondition<C> for NumSteps {
    fn should_stop(&self, ga: &GeneticAlgorithm<C>) -> bool {
        ga.generation() >= self.0
    }
}

/// Stops once the fittest genotype reaches `bound`.
///
/// An empty population never reaches the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessBound(pub f64);

impl<C> StopCondition<C> for FitnessBound {
    fn should_stop(&self, ga: &GeneticAlgorithm<C>) -> bool {
        let population = ga.population();
        population
            .fittest()
            .is_some_and(|best| population.score(best) >= self.0)
    }
}

/// Runs until [`GeneticAlgorithm::stop`] is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl<C> StopCondition<C> for Never {
    fn should_stop(&self, _ga: &GeneticAlgorithm<C>) -> bool {
        false
    }
}

/// Adapts a predicate over the algorithm.
pub struct StopWhen<F>(pub F);

impl<C, F> StopCondition<C> for StopWhen<F>
where
    F: Fn(&GeneticAlgorithm<C>) -> bool,
{
    fn should_stop(&self, ga: &GeneticAlgorithm<C>) -> bool {
        (self.0)(ga)
    }
}
