//! Random initializers for list genotypes.

use super::alphabet::Alphabet;
use super::ListGenotype;
use crate::error::{GaError, Result};
use crate::ga::{Genotype, Initializer};
use rand::distr::uniform::SampleUniform;
use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// Genotypes of `size` genes drawn independently from an alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphabetInitializer<T> {
    size: usize,
    alphabet: Alphabet<T>,
}

impl<T> AlphabetInitializer<T> {
    pub fn new(size: usize, alphabet: Alphabet<T>) -> Self {
        Self { size, alphabet }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alphabet(&self) -> &Alphabet<T> {
        &self.alphabet
    }
}

impl<T: Clone> Initializer<Vec<T>> for AlphabetInitializer<T> {
    fn create(&self, rng: &mut dyn RngCore) -> ListGenotype<T> {
        Genotype::new((0..self.size).map(|_| self.alphabet.get(rng)).collect())
    }
}

/// Genotypes of `size` pairwise distinct symbols in random order.
///
/// With `size` equal to the alphabet length every genotype is a
/// permutation of the alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationInitializer<T> {
    size: usize,
    alphabet: Alphabet<T>,
}

impl<T> PermutationInitializer<T> {
    /// # Errors
    /// [`GaError::MoreGenesRequiredThanExisting`] when the alphabet has
    /// fewer than `size` symbols.
    pub fn new(size: usize, alphabet: Alphabet<T>) -> Result<Self> {
        if size > alphabet.len() {
            return Err(GaError::MoreGenesRequiredThanExisting {
                requested: size,
                available: alphabet.len(),
            });
        }
        Ok(Self { size, alphabet })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alphabet(&self) -> &Alphabet<T> {
        &self.alphabet
    }
}

impl<T: Clone> Initializer<Vec<T>> for PermutationInitializer<T> {
    fn create(&self, rng: &mut dyn RngCore) -> ListGenotype<T> {
        let genes = self.alphabet.genes();
        let picked = rand::seq::index::sample(rng, genes.len(), self.size);
        Genotype::new(picked.iter().map(|i| genes[i].clone()).collect())
    }
}

/// Gene types an [`IntervalInitializer`] can draw uniformly.
pub trait IntervalGene: PartialOrd + Copy + SampleUniform {
    /// Whether every value of `[lower, upper]` can be drawn. `lower < upper`.
    fn spans(lower: Self, upper: Self) -> bool;
}

macro_rules! impl_integer_gene {
    ($($t:ty),*) => {$(
        impl IntervalGene for $t {
            fn spans(_lower: Self, _upper: Self) -> bool {
                true
            }
        }
    )*};
}

macro_rules! impl_real_gene {
    ($($t:ty),*) => {$(
        impl IntervalGene for $t {
            fn spans(lower: Self, upper: Self) -> bool {
                (upper - lower).is_finite()
            }
        }
    )*};
}

impl_integer_gene!(i8, i16, i32, i64, u8, u16, u32, u64, usize);
impl_real_gene!(f32, f64);

/// Genotypes of `size` genes drawn uniformly from `[lower, upper]`.
///
/// ```
/// use u_genetic::ga::Initializer;
/// use u_genetic::list::IntegerIntervalInitializer;
/// use u_genetic::random::create_rng;
///
/// let initializer = IntegerIntervalInitializer::new(8, 5, -5).unwrap();
/// assert_eq!((initializer.lower(), initializer.upper()), (-5, 5));
///
/// let genotype = initializer.create(&mut create_rng(42));
/// assert!(genotype.iter().all(|g| (-5..=5).contains(g)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalInitializer<T> {
    size: usize,
    lower: T,
    upper: T,
}

/// Integer genes.
pub type IntegerIntervalInitializer = IntervalInitializer<i64>;

/// Real genes.
pub type RealIntervalInitializer = IntervalInitializer<f64>;

impl<T: IntervalGene> IntervalInitializer<T> {
    /// Swapped bounds are reordered.
    ///
    /// # Errors
    /// - [`GaError::BoundsCannotBeTheSame`] when `lower == upper`
    /// - [`GaError::InvalidConfig`] when the bounds are not comparable
    ///   (NaN) or the interval is not finite
    pub fn new(size: usize, lower: T, upper: T) -> Result<Self> {
        let (lower, upper) = interval_bounds(lower, upper)?;
        Ok(Self { size, lower, upper })
    }
}

impl<T: Copy> IntervalInitializer<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }
}

impl<T: IntervalGene> Initializer<Vec<T>> for IntervalInitializer<T> {
    fn create(&self, rng: &mut dyn RngCore) -> ListGenotype<T> {
        Genotype::new(
            (0..self.size)
                .map(|_| rng.random_range(self.lower..=self.upper))
                .collect(),
        )
    }
}

/// Returns `(min, max)` of two distinct, comparable bounds.
pub(crate) fn ordered_bounds<T: PartialOrd>(lower: T, upper: T) -> Result<(T, T)> {
    match lower.partial_cmp(&upper) {
        Some(Ordering::Less) => Ok((lower, upper)),
        Some(Ordering::Greater) => Ok((upper, lower)),
        Some(Ordering::Equal) => Err(GaError::BoundsCannotBeTheSame),
        None => Err(GaError::InvalidConfig(
            "interval bounds are not comparable".into(),
        )),
    }
}

/// [`ordered_bounds`] of an interval that can be sampled.
pub(crate) fn interval_bounds<T: IntervalGene>(lower: T, upper: T) -> Result<(T, T)> {
    let (lower, upper) = ordered_bounds(lower, upper)?;
    if !T::spans(lower, upper) {
        return Err(GaError::InvalidConfig(
            "interval bounds must span a finite range".into(),
        ));
    }
    Ok((lower, upper))
}
