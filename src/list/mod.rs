//! Operators for genotypes encoded as lists of genes.
//!
//! A [`ListGenotype`] is a [`Genotype`] over a `Vec<T>`. This module
//! provides the pieces to evolve them with a
//! [`GeneticAlgorithm`](crate::ga::GeneticAlgorithm):
//!
//! - [`Alphabet`]: the symbols a gene may take
//! - Initializers: [`AlphabetInitializer`], [`PermutationInitializer`],
//!   [`IntegerIntervalInitializer`] and [`RealIntervalInitializer`]
//! - Recombinations: [`NPivot`], [`RandomMask`], [`Pmx`], [`OrderCrossover`]
//!   and [`RangeCrossover`]; [`GeneralisedCrossover`] for binary genes;
//!   [`PlainRecombination`] and [`FlexibleRecombination`] for real genes
//! - Mutations: [`RandomGene`], [`SwapGenes`] and [`Creep`]
//! - Diversity measures: [`average_hamming`] and [`different_genes`]

mod alphabet;
mod diversity;
mod initializer;
mod mutation;
mod recombination;

use crate::ga::Genotype;

/// A genotype whose chromosome is a list of genes.
pub type ListGenotype<T> = Genotype<Vec<T>>;

pub use alphabet::Alphabet;
pub use diversity::{average_hamming, different_genes};
pub use initializer::{
    AlphabetInitializer, IntegerIntervalInitializer, IntervalGene, IntervalInitializer,
    PermutationInitializer, RealIntervalInitializer,
};
pub use mutation::{Creep, RandomGene, SwapGenes};
pub use recombination::{
    generalised_crossover, masked, n_pivot, order_crossover, plain_recombination, pmx,
    FlexibleRecombination, GeneralisedCrossover, NPivot, OrderCrossover, PlainRecombination, Pmx,
    RandomMask, RangeCrossover, GENERALISED_MAX_BITS,
};
