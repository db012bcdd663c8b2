//! Symbol sets for list genotypes.

use crate::error::{GaError, Result};
use rand::{Rng, RngCore};

/// The set of values a gene may take.
///
/// Symbols are deduplicated on construction, keeping their first
/// occurrence order, and at least two distinct symbols are required.
///
/// ```
/// use u_genetic::list::Alphabet;
///
/// let alphabet = Alphabet::new("abca".chars()).unwrap();
/// assert_eq!(alphabet.genes(), &['a', 'b', 'c']);
/// assert!(Alphabet::new([1, 1, 1]).is_err());
/// ```
///
/// With the `serde` feature an alphabet serializes as its list of symbols,
/// and deserializing goes through [`Alphabet::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet<T> {
    genes: Vec<T>,
}

impl<T: PartialEq> Alphabet<T> {
    /// Builds an alphabet from `genes`.
    ///
    /// # Errors
    /// [`GaError::TooFewGenes`] with the number of distinct symbols when
    /// fewer than two remain after deduplication.
    pub fn new(genes: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut unique: Vec<T> = Vec::new();
        for gene in genes {
            if !unique.contains(&gene) {
                unique.push(gene);
            }
        }
        if unique.len() < 2 {
            return Err(GaError::TooFewGenes(unique.len()));
        }
        Ok(Self { genes: unique })
    }

    /// Whether `gene` belongs to this alphabet.
    pub fn contains(&self, gene: &T) -> bool {
        self.genes.contains(gene)
    }
}

impl<T> Alphabet<T> {
    /// The distinct symbols, in insertion order.
    pub fn genes(&self) -> &[T] {
        &self.genes
    }

    /// Number of distinct symbols. Always at least 2.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl<T: Clone> Alphabet<T> {
    /// A uniformly drawn symbol.
    pub fn get(&self, rng: &mut dyn RngCore) -> T {
        self.genes[rng.random_range(0..self.genes.len())].clone()
    }

    /// `n` uniformly drawn symbols.
    ///
    /// With `repetitions` the draws are independent; without, every symbol
    /// appears at most once and the order is random.
    ///
    /// # Errors
    /// [`GaError::MoreGenesRequiredThanExisting`] when `n` exceeds the
    /// alphabet size and repetitions are not allowed.
    pub fn sample(&self, n: usize, repetitions: bool, rng: &mut dyn RngCore) -> Result<Vec<T>> {
        if repetitions {
            return Ok((0..n).map(|_| self.get(rng)).collect());
        }
        if n > self.genes.len() {
            return Err(GaError::MoreGenesRequiredThanExisting {
                requested: n,
                available: self.genes.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, self.genes.len(), n)
            .iter()
            .map(|i| self.genes[i].clone())
            .collect())
    }
}

impl<T: PartialEq> TryFrom<Vec<T>> for Alphabet<T> {
    type Error = GaError;

    fn try_from(genes: Vec<T>) -> Result<Self> {
        Self::new(genes)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Alphabet<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.genes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Alphabet<T>
where
    T: serde::Deserialize<'de> + PartialEq,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let genes = <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Self::new(genes).map_err(serde::de::Error::custom)
    }
}

impl Alphabet<u8> {
    fn digits(base: u8) -> Self {
        Self {
            genes: (0..base).collect(),
        }
    }

    /// `0` and `1`.
    pub fn binary() -> Self {
        Self::digits(2)
    }

    /// `0..8`.
    pub fn octal() -> Self {
        Self::digits(8)
    }

    /// `0..10`.
    pub fn decimal() -> Self {
        Self::digits(10)
    }

    /// `0..16`.
    pub fn hexadecimal() -> Self {
        Self::digits(16)
    }
}

impl Alphabet<char> {
    /// The four nucleotides `A`, `C`, `G` and `T`.
    pub fn genetic_code() -> Self {
        Self {
            genes: vec!['A', 'C', 'G', 'T'],
        }
    }
}
