//! Genetic Algorithm framework.
//!
//! A generic GA engine over any chromosome type `C`. Callers provide an
//! [`Initializer`], a fitness function and the operators; the engine runs
//! the evolutionary loop and keeps the population bookkeeping.
//!
//! # Operator contracts
//!
//! - [`Selection`]: draws parents from a population
//! - [`Recombination`]: breeds progeny from a fixed number of parents
//! - [`Mutation`]: perturbs a genotype, forking it before any write
//! - [`Replacement`]: merges population and offspring into the next generation
//! - [`StopCondition`] and [`Callback`]: observe and end the run loop
//!
//! # Key Types
//!
//! - [`Genotype`] and [`Population`]: candidate solutions and their container
//! - [`GaConfig`]: Algorithm parameters (population size, ratios, presets)
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with the fitness history
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod callback;
mod config;
mod operators;
mod population;
mod replacement;
mod runner;
mod selection;
mod stop;
mod types;

pub use callback::{Callback, TracingCallback};
pub use config::GaConfig;
pub use operators::{
    Mutation, MutationFn, NoMutation, NoRecombination, Recombination, RecombinationFn,
};
pub use population::Population;
pub use replacement::{HighElitism, LowElitism, Replacement};
pub use runner::{GaResult, GeneticAlgorithm};
pub use selection::{
    ExponentialRank, LinearRank, MonteCarlo, RankWeights, RouletteWheel, Selection, Tournament,
    Truncation,
};
pub use stop::{FitnessBound, Never, NumSteps, StopCondition, StopWhen};
pub use types::{fitness_fn, FitnessFn, Genotype, GenotypeId, Initializer};
