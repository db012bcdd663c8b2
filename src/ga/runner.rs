//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the evolutionary process:
//! initialization → selection → recombination → mutation → replacement → repeat.

use super::callback::Callback;
use super::config::GaConfig;
use super::operators::{Mutation, NoMutation, NoRecombination, Recombination};
use super::population::Population;
use super::replacement::Replacement;
use super::selection::Selection;
use super::stop::{NumSteps, StopCondition};
use super::types::{FitnessFn, Genotype, Initializer};
use crate::error::{GaError, Result};
use crate::random::{create_rng, Probability};
use rand::rngs::StdRng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<C> {
    /// The fittest genotype of the final population.
    pub best: Genotype<C>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run ended through [`GeneticAlgorithm::stop`] rather than
    /// its stop condition.
    pub stopped: bool,

    /// Best fitness of the initial population, then after each generation.
    pub fitness_history: Vec<f64>,
}

/// A canonical, modular genetic algorithm.
///
/// Each step fills an offspring buffer of
/// [`offspring_size`](Self::offspring_size) genotypes by repeatedly selecting
/// [`selection_size`](Self::selection_size) parents, recombining them with
/// the recombination probability, and mutating the progeny. The replacement
/// schema then merges the offspring into the next generation.
///
/// # Usage
///
/// ```
/// use u_genetic::ga::{
///     fitness_fn, GaConfig, GeneticAlgorithm, HighElitism, NumSteps, Tournament,
/// };
/// use u_genetic::list::{Alphabet, AlphabetInitializer, RandomGene, RandomMask};
///
/// let binary = Alphabet::binary();
/// let ones = fitness_fn(|genes: &Vec<u8>| genes.iter().filter(|&&g| g == 1).count() as f64);
///
/// let mut ga = GeneticAlgorithm::new(
///     GaConfig::default().with_population_size(20).with_seed(42),
///     AlphabetInitializer::new(16, binary.clone()),
///     ones,
///     Tournament::new(3, false),
///     HighElitism,
/// )
/// .unwrap()
/// .with_recombination(RandomMask, 1.0)
/// .with_mutation(RandomGene::new(binary), 1.0 / 16.0)
/// .with_stop_condition(NumSteps(50));
///
/// let result = ga.run().unwrap();
/// assert_eq!(result.generations, 50);
/// assert!(result.best_fitness >= 12.0);
/// ```
pub struct GeneticAlgorithm<C> {
    population_size: usize,
    replacement_ratio: f64,
    initializer: Box<dyn Initializer<C>>,
    fitness: FitnessFn<C>,
    selection: Box<dyn Selection<C>>,
    recombination: Box<dyn Recombination<C>>,
    recombination_probability: Probability,
    mutation: Box<dyn Mutation<C>>,
    mutation_probability: Probability,
    replacement: Box<dyn Replacement<C>>,
    stop_condition: Box<dyn StopCondition<C>>,
    callbacks: Vec<Box<dyn Callback<C>>>,
    population: Population<C>,
    generation: usize,
    history: Vec<f64>,
    stop_requested: Arc<AtomicBool>,
    rng: StdRng,
}

impl<C: Clone> GeneticAlgorithm<C> {
    /// Creates an algorithm without recombination nor mutation.
    ///
    /// The stop condition defaults to
    /// [`NumSteps(config.max_generations)`](NumSteps), and the generator is
    /// seeded from `config.seed` (random when unset).
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] if `config` does not validate.
    pub fn new<I, S, R>(
        config: GaConfig,
        initializer: I,
        fitness: FitnessFn<C>,
        selection: S,
        replacement: R,
    ) -> Result<Self>
    where
        I: Initializer<C> + 'static,
        S: Selection<C> + 'static,
        R: Replacement<C> + 'static,
        C: 'static,
    {
        config.validate()?;

        let rng = create_rng(config.seed.unwrap_or_else(rand::random));

        Ok(Self {
            population_size: config.population_size,
            replacement_ratio: config.replacement_ratio,
            initializer: Box::new(initializer),
            population: Population::new(config.population_size, fitness.clone()),
            fitness,
            selection: Box::new(selection),
            recombination: Box::new(NoRecombination),
            recombination_probability: Probability::new(config.recombination_probability),
            mutation: Box::new(NoMutation),
            mutation_probability: Probability::new(config.mutation_probability),
            replacement: Box::new(replacement),
            stop_condition: Box::new(NumSteps(config.max_generations)),
            callbacks: Vec::new(),
            generation: 0,
            history: Vec::new(),
            stop_requested: Arc::new(AtomicBool::new(false)),
            rng,
        })
    }

    /// Renews the population and resets the generation counter.
    ///
    /// Also clears a pending stop request, then fires
    /// [`Callback::on_algorithm_begin`].
    pub fn initialize(&mut self) -> Result<()> {
        self.generation = 0;
        self.history.clear();
        self.stop_requested.store(false, Ordering::Relaxed);

        self.population.clear();
        self.population.set_max_size(self.population_size);
        self.initializer.fill(&mut self.population, &mut self.rng)?;
        self.record_best();

        self.notify(|callback, ga| callback.on_algorithm_begin(ga));
        Ok(())
    }

    /// Runs one generation, without callbacks nor generation bookkeeping.
    ///
    /// # Errors
    /// Any error raised by the operators is returned as is. Selection
    /// errors leave the population untouched.
    pub fn step(&mut self) -> Result<()> {
        let selection_size = self.selection_size();
        let mut offspring = Population::new(self.offspring_size(), self.fitness.clone());

        while !offspring.is_full() {
            let parents = self
                .selection
                .select(&self.population, selection_size, &mut self.rng)?;

            let progeny = if self.recombination_probability.happens(&mut self.rng) {
                let mut children = self.recombination.recombine(&parents, &mut self.rng);
                for child in &mut children {
                    if !parents.iter().any(|p| p.id() == child.id()) {
                        child.add_parents(&parents);
                    }
                }
                children
            } else {
                parents
            };
            if progeny.is_empty() {
                return Err(GaError::InvalidConfig(
                    "recombination produced no progeny".into(),
                ));
            }

            // Uniform subset of the progeny that still fits.
            let size = progeny.len().min(offspring.remaining());
            let picked = rand::seq::index::sample(&mut self.rng, progeny.len(), size);
            let mut progeny: Vec<Option<Genotype<C>>> = progeny.into_iter().map(Some).collect();
            for i in picked.iter() {
                if let Some(genotype) = progeny[i].take() {
                    let probability = self.mutation_probability;
                    let genotype = self.mutation.mutate(probability, genotype, &mut self.rng);
                    offspring.push(genotype)?;
                }
            }
        }

        tracing::debug!(
            generation = self.generation,
            offspring = offspring.len(),
            "offspring complete"
        );

        let next = self.replacement.replace(
            &mut self.population,
            &mut offspring,
            Some(self.population_size),
        )?;
        self.population = next;
        Ok(())
    }

    /// One iteration of the run loop.
    ///
    /// Fires [`Callback::on_step_begin`], runs [`step`](Self::step),
    /// increments the generation and fires [`Callback::on_step_end`].
    pub fn advance(&mut self) -> Result<()> {
        self.notify(|callback, ga| callback.on_step_begin(ga));
        self.step()?;
        self.generation += 1;
        self.record_best();
        self.notify(|callback, ga| callback.on_step_end(ga));
        Ok(())
    }

    /// Fires [`Callback::on_algorithm_end`].
    pub fn finalize(&mut self) {
        self.notify(|callback, ga| callback.on_algorithm_end(ga));
    }

    /// Initializes, then advances until the stop condition holds or a stop
    /// is requested.
    ///
    /// Both are checked after each completed step, so a run always executes
    /// at least one generation.
    ///
    /// # Errors
    /// The first error raised by the initializer or a step; the run ends
    /// there and [`finalize`](Self::finalize) is not called.
    pub fn run(&mut self) -> Result<GaResult<C>> {
        self.initialize()?;

        loop {
            self.advance()?;
            if !self.is_running() || self.stop_condition.should_stop(self) {
                break;
            }
        }
        let stopped = !self.is_running();

        self.finalize();

        let best = self.best()?.clone();
        let best_fitness = best.fitness()?;
        tracing::debug!(
            generations = self.generation,
            best_fitness,
            stopped,
            "run finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations: self.generation,
            stopped,
            fitness_history: self.history.clone(),
        })
    }
}

impl<C> GeneticAlgorithm<C> {
    // ---- builders ----

    /// Sets the recombination operator and its probability.
    pub fn with_recombination<R>(
        mut self,
        recombination: R,
        probability: impl Into<Probability>,
    ) -> Self
    where
        R: Recombination<C> + 'static,
    {
        self.set_recombination(recombination);
        self.set_recombination_probability(probability);
        self
    }

    /// Sets the mutation operator and its probability.
    pub fn with_mutation<M>(mut self, mutation: M, probability: impl Into<Probability>) -> Self
    where
        M: Mutation<C> + 'static,
    {
        self.set_mutation(mutation);
        self.set_mutation_probability(probability);
        self
    }

    /// Replaces the stop condition.
    pub fn with_stop_condition<S>(mut self, stop_condition: S) -> Self
    where
        S: StopCondition<C> + 'static,
    {
        self.stop_condition = Box::new(stop_condition);
        self
    }

    /// Registers a callback. Callbacks fire in registration order.
    pub fn with_callback<B>(mut self, callback: B) -> Self
    where
        B: Callback<C> + 'static,
    {
        self.callbacks.push(Box::new(callback));
        self
    }

    // ---- configuration ----

    /// Target capacity of the population.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Changes the target capacity. Takes effect from the next step.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn replacement_ratio(&self) -> f64 {
        self.replacement_ratio
    }

    pub fn set_replacement_ratio(&mut self, ratio: f64) {
        self.replacement_ratio = ratio;
    }

    /// Genotypes bred per step: `round(population_size * replacement_ratio)`
    /// clamped into `[1, population_size]`.
    pub fn offspring_size(&self) -> usize {
        let upper = self.population_size.max(1);
        let size = (self.population_size as f64 * self.replacement_ratio).round();
        if size >= 1.0 {
            (size.min(upper as f64) as usize).clamp(1, upper)
        } else {
            1
        }
    }

    /// Parents selected per breeding: the arity of the recombination.
    pub fn selection_size(&self) -> usize {
        self.recombination.arity().max(1)
    }

    /// Replaces the recombination operator.
    pub fn set_recombination<R>(&mut self, recombination: R)
    where
        R: Recombination<C> + 'static,
    {
        self.recombination = Box::new(recombination);
    }

    pub fn recombination_probability(&self) -> Probability {
        self.recombination_probability
    }

    /// Clamped into `[0, 1]`; missing or non-numeric values become `0`.
    pub fn set_recombination_probability(&mut self, probability: impl Into<Probability>) {
        self.recombination_probability = probability.into();
    }

    /// Replaces the mutation operator.
    pub fn set_mutation<M>(&mut self, mutation: M)
    where
        M: Mutation<C> + 'static,
    {
        self.mutation = Box::new(mutation);
    }

    pub fn mutation_probability(&self) -> Probability {
        self.mutation_probability
    }

    /// Clamped into `[0, 1]`; missing or non-numeric values become `0`.
    pub fn set_mutation_probability(&mut self, probability: impl Into<Probability>) {
        self.mutation_probability = probability.into();
    }

    pub fn fitness(&self) -> &FitnessFn<C> {
        &self.fitness
    }

    /// Replaces the fitness function, here and in every current member.
    pub fn set_fitness(&mut self, fitness: FitnessFn<C>) {
        self.population.set_fitness(fitness.clone());
        self.fitness = fitness;
    }

    // ---- state ----

    /// Completed generations since the last [`initialize`](Self::initialize).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The population of the latest completed generation.
    pub fn population(&self) -> &Population<C> {
        &self.population
    }

    /// Best fitness of the initial population, then after each generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.history
    }

    /// The fittest genotype. Sorts the population.
    ///
    /// # Errors
    /// [`GaError::NotInitialized`] if the population is empty.
    pub fn best(&mut self) -> Result<&Genotype<C>> {
        self.population.sort();
        self.population
            .as_slice()
            .last()
            .ok_or(GaError::NotInitialized)
    }

    /// Requests the run loop to end once the current step completes.
    pub fn stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    /// Shared stop flag, for stopping a run from another thread.
    ///
    /// Storing `true` has the same effect as [`stop`](Self::stop).
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_requested)
    }

    /// `false` once a stop was requested, until the next
    /// [`initialize`](Self::initialize).
    pub fn is_running(&self) -> bool {
        !self.stop_requested.load(Ordering::Relaxed)
    }

    fn record_best(&mut self) {
        if let Some(best) = self.population.fittest() {
            let fitness = self.population.score(best);
            self.history.push(fitness);
        }
    }

    /// Calls `hook` on every callback with mutable access to `self`.
    fn notify<F>(&mut self, mut hook: F)
    where
        F: FnMut(&mut Box<dyn Callback<C>>, &mut Self),
    {
        let mut callbacks = std::mem::take(&mut self.callbacks);
        for callback in &mut callbacks {
            hook(callback, self);
        }
        // Keep callbacks registered while the hooks ran.
        callbacks.append(&mut self.callbacks);
        self.callbacks = callbacks;
    }
}

impl<C> fmt::Debug for GeneticAlgorithm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("population_size", &self.population_size)
            .field("replacement_ratio", &self.replacement_ratio)
            .field("recombination_probability", &self.recombination_probability)
            .field("mutation_probability", &self.mutation_probability)
            .field("selection_size", &self.selection_size())
            .field("generation", &self.generation)
            .field("population", &self.population.len())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
