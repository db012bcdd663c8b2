//! Diversity measures over groups of list genotypes.
//!
//! Both measures return a value in `[0, 1]`: `0` for a population of
//! identical genotypes, `1` for maximal spread.

use super::alphabet::Alphabet;
use super::ListGenotype;

/// Mean normalised Hamming distance over every pair of genotypes.
///
/// The distance between two genotypes is the fraction of positions whose
/// genes differ, measured over the longer one (missing positions count as
/// different). Fewer than two genotypes yield `0`.
///
/// ```
/// use u_genetic::ga::Genotype;
/// use u_genetic::list::average_hamming;
///
/// let genotypes = [Genotype::new(vec![0, 0]), Genotype::new(vec![0, 1])];
/// assert_eq!(average_hamming(&genotypes), 0.5);
/// ```
pub fn average_hamming<T: PartialEq>(genotypes: &[ListGenotype<T>]) -> f64 {
    let n = genotypes.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for (i, a) in genotypes.iter().enumerate() {
        for b in &genotypes[i + 1..] {
            total += hamming(a.chromosome(), b.chromosome());
        }
    }
    total / (n * (n - 1) / 2) as f64
}

fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let len = a.len().max(b.len());
    if len == 0 {
        return 0.0;
    }
    let common = a.len().min(b.len());
    let differing = a.iter().zip(b).filter(|(x, y)| x != y).count() + (len - common);
    differing as f64 / len as f64
}

/// Share of the alphabet in use at each position, averaged over positions.
///
/// A position where `k` distinct symbols appear scores
/// `(k - 1) / (alphabet.len() - 1)`: `0` when every genotype agrees, `1`
/// when the whole alphabet is present. Positions only some genotypes reach
/// are scored over those. An empty group yields `0`.
///
/// ```
/// use u_genetic::ga::Genotype;
/// use u_genetic::list::{different_genes, Alphabet};
///
/// let genotypes = [
///     Genotype::new(vec![0, 0, 0, 0]),
///     Genotype::new(vec![0, 0, 0, 1]),
/// ];
/// assert_eq!(different_genes(&Alphabet::binary(), &genotypes), 0.25);
/// ```
pub fn different_genes<T: PartialEq>(alphabet: &Alphabet<T>, genotypes: &[ListGenotype<T>]) -> f64 {
    let len = genotypes.iter().map(|g| g.len()).max().unwrap_or(0);
    if len == 0 {
        return 0.0;
    }
    let symbols = (alphabet.len().max(2) - 1) as f64;

    let mut total = 0.0;
    for i in 0..len {
        let mut seen: Vec<&T> = Vec::new();
        for gene in genotypes.iter().filter_map(|g| g.get(i)) {
            if !seen.contains(&gene) {
                seen.push(gene);
            }
        }
        total += (seen.len().saturating_sub(1) as f64 / symbols).min(1.0);
    }
    total / len as f64
}
