//! GA configuration.
//!
//! [`GaConfig`] holds the numeric parameters of the evolutionary loop.
//! Operators (selection, recombination, mutation, replacement) are passed
//! to [`GeneticAlgorithm`](super::GeneticAlgorithm) directly.

use crate::error::{GaError, Result};
use crate::random::Probability;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_genetic::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_replacement_ratio(0.5)
///     .with_mutation_probability(0.05)
///     .with_seed(42);
/// assert_eq!(config.mutation_probability, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Capacity of the main population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    /// Typical range: 50–500.
    pub population_size: usize,

    /// Generations before the default stop condition triggers.
    pub max_generations: usize,

    /// Offspring produced per step, as a fraction of the population size.
    ///
    /// The resulting count is rounded and clamped into
    /// `[1, population_size]`, so any finite value is usable: `1.0` is a
    /// generational scheme, small values a steady-state one.
    pub replacement_ratio: f64,

    /// Probability of recombining a group of selected parents (0.0–1.0).
    ///
    /// When recombination is skipped the parents themselves are passed on.
    pub recombination_probability: f64,

    /// Probability handed to the mutation operator (0.0–1.0).
    pub mutation_probability: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            replacement_ratio: 1.0,
            recombination_probability: 0.9,
            mutation_probability: 0.1,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the replacement ratio.
    pub fn with_replacement_ratio(mut self, ratio: f64) -> Self {
        self.replacement_ratio = ratio;
        self
    }

    /// Sets the recombination probability, clamped into `[0, 1]`.
    pub fn with_recombination_probability(mut self, p: impl Into<Probability>) -> Self {
        self.recombination_probability = p.into().value();
        self
    }

    /// Sets the mutation probability, clamped into `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: impl Into<Probability>) -> Self {
        self.mutation_probability = p.into().value();
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 50, Generations: 100
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            ..Self::default()
        }
    }

    /// Preset balancing solution quality and computation time.
    ///
    /// - Population: 100, Generations: 300
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            ..Self::default()
        }
    }

    /// Preset for quality optimization: large population, many generations.
    ///
    /// - Population: 150, Generations: 500, steady-state (ratio 0.5)
    pub fn quality() -> Self {
        Self {
            population_size: 150,
            max_generations: 500,
            replacement_ratio: 0.5,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Probabilities are never rejected: they are clamped into `[0, 1]`
    /// when the algorithm is built.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(GaError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !self.replacement_ratio.is_finite() {
            return Err(GaError::InvalidConfig(
                "replacement_ratio must be finite".into(),
            ));
        }
        Ok(())
    }
}
