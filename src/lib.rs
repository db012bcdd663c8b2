//! Modular genetic algorithm engine.
//!
//! A generic evolutionary loop over any chromosome type, assembled from
//! pluggable operators:
//!
//! - **Genetic Algorithm ([`ga`])**: genotypes, populations, the
//!   [`GeneticAlgorithm`](ga::GeneticAlgorithm) runner and the operator
//!   contracts (selection, recombination, mutation, replacement), plus stop
//!   conditions and run callbacks.
//! - **List encodings ([`list`])**: alphabets, initializers, crossovers,
//!   mutations and diversity measures for genotypes stored as `Vec<T>`.
//! - **Randomness ([`random`])**: seeded generators and clamped
//!   probabilities. Every stochastic decision draws from the generator
//!   owned by the algorithm, so a run is reproducible from its seed.
//!
//! # Example
//!
//! ```
//! use u_genetic::ga::{fitness_fn, GaConfig, GeneticAlgorithm, HighElitism, NumSteps, Tournament};
//! use u_genetic::list::{Alphabet, AlphabetInitializer, NPivot, RandomGene};
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_seed(7);
//! let mut ga = GeneticAlgorithm::new(
//!     config,
//!     AlphabetInitializer::new(12, Alphabet::binary()),
//!     fitness_fn(|genes: &Vec<u8>| genes.iter().map(|&g| g as f64).sum()),
//!     Tournament::default(),
//!     HighElitism,
//! )
//! .unwrap()
//! .with_recombination(NPivot::two(), 0.9)
//! .with_mutation(RandomGene::new(Alphabet::binary()), 1.0 / 12.0)
//! .with_stop_condition(NumSteps(40));
//!
//! let result = ga.run().unwrap();
//! assert_eq!(result.generations, 40);
//! assert!(result.best_fitness >= 6.0);
//! ```

pub mod error;
pub mod ga;
pub mod list;
pub mod random;

pub use error::{GaError, Result};
