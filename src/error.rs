//! Error types for the GA engine.
//!
//! Every fatal condition is reported through [`GaError`]. Conditions that
//! are corrected on the fly (an invalid replacement size, a malformed
//! probability string) are not errors; they are logged with
//! [`tracing::warn!`] and the call proceeds.

use thiserror::Error;

/// Errors raised by populations, operators and the evolutionary loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// Inserting would exceed the population capacity.
    #[error("population is full (max size {max_size})")]
    FullPopulation { max_size: usize },

    /// Index outside the current population length.
    #[error("index {index} out of range for population of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The algorithm was queried before a population existed.
    #[error("algorithm not initialized: population is empty")]
    NotInitialized,

    /// Selection was attempted on an empty population.
    #[error("cannot select from an empty population")]
    EmptyPopulation,

    /// Selection size must be strictly positive.
    #[error("wrong selection size: {0}")]
    WrongSelectionSize(usize),

    /// Selection without replacement asked for more genotypes than exist.
    #[error("cannot select {requested} genotypes without replacement from {available}")]
    CannotSelectThatMany { requested: usize, available: usize },

    /// The genotype has no fitness function attached.
    #[error("genotype has no fitness function")]
    NoFitnessFunction,

    /// An alphabet needs at least two distinct symbols.
    #[error("alphabet needs at least 2 distinct genes, got {0}")]
    TooFewGenes(usize),

    /// Lower and upper bounds of an interval are equal.
    #[error("interval bounds cannot be the same")]
    BoundsCannotBeTheSame,

    /// More distinct genes were requested than the alphabet holds.
    #[error("requested {requested} distinct genes but only {available} exist")]
    MoreGenesRequiredThanExisting { requested: usize, available: usize },

    /// Invalid algorithm or operator configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
