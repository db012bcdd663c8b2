//! Selection schemas for the GA.
//!
//! Selection draws the parents of each breeding round from the current
//! population. Schemas differ in the probability they give each member,
//! and every schema can sample with or without replacement.
//!
//! Ranks are 0-based positions in ascending fitness order: rank 0 is the
//! least fit member and rank `len - 1` the fittest.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::population::Population;
use super::types::Genotype;
use crate::error::{GaError, Result};
use rand::{Rng, RngCore};

/// Picks `n` genotypes from a population.
///
/// Implementors provide [`sample`](Selection::sample); callers use
/// [`select`](Selection::select), which validates the request first.
pub trait Selection<C> {
    /// Whether a genotype may be picked more than once.
    fn replacement(&self) -> bool;

    /// Draws `n` genotypes. The request has already been validated.
    fn sample(
        &self,
        population: &Population<C>,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<Genotype<C>>;

    /// Validates the request and draws `n` genotypes.
    ///
    /// # Errors
    /// - [`GaError::EmptyPopulation`] if there is nothing to select from.
    /// - [`GaError::WrongSelectionSize`] if `n == 0`.
    /// - [`GaError::CannotSelectThatMany`] if sampling without replacement
    ///   and `n` exceeds the population length.
    fn select(
        &self,
        population: &Population<C>,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Genotype<C>>> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        if n == 0 {
            return Err(GaError::WrongSelectionSize(n));
        }
        if !self.replacement() && n > population.len() {
            return Err(GaError::CannotSelectThatMany {
                requested: n,
                available: population.len(),
            });
        }
        Ok(self.sample(population, n, rng))
    }
}

/// Every member is equally likely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonteCarlo {
    replacement: bool,
}

impl MonteCarlo {
    pub fn new(replacement: bool) -> Self {
        Self { replacement }
    }
}

impl<C: Clone> Selection<C> for MonteCarlo {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn sample(
        &self,
        population: &Population<C>,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<Genotype<C>> {
        let len = population.len();
        let indices: Vec<usize> = if self.replacement {
            (0..n).map(|_| rng.random_range(0..len)).collect()
        } else {
            rand::seq::index::sample(rng, len, n).into_vec()
        };
        pick(population, indices)
    }
}

/// Deterministically keeps the fittest.
///
/// With replacement the fittest member is returned `n` times; without it,
/// the `n` fittest in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Truncation {
    replacement: bool,
}

impl Truncation {
    pub fn new(replacement: bool) -> Self {
        Self { replacement }
    }
}

impl<C: Clone> Selection<C> for Truncation {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn sample(
        &self,
        population: &Population<C>,
        n: usize,
        _rng: &mut dyn RngCore,
    ) -> Vec<Genotype<C>> {
        let mut ranking = population.ranking();
        ranking.reverse();
        let indices: Vec<usize> = if self.replacement {
            vec![ranking[0]; n]
        } else {
            ranking.into_iter().take(n).collect()
        };
        pick(population, indices)
    }
}

/// Tournament selection: draw `m` members uniformly and keep the best.
///
/// The `m` contenders are drawn with replacement. Without outer
/// replacement, each winner leaves the pool for the following rounds.
///
/// Higher `m` = stronger selection pressure.
/// - m=2: light pressure (good for diversity)
/// - m=3-5: moderate pressure (typical default)
/// - m>5: strong pressure (risk of premature convergence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    /// Contenders per round. Values below 1 behave as 1.
    pub m: usize,
    replacement: bool,
}

impl Tournament {
    pub fn new(m: usize, replacement: bool) -> Self {
        Self { m, replacement }
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Tournament::new(3, false)
    }
}

impl<C: Clone> Selection<C> for Tournament {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn sample(
        &self,
        population: &Population<C>,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<Genotype<C>> {
        let m = self.m.max(1);
        let scores: Vec<f64> = population.iter().map(|g| population.score(g)).collect();
        let mut pool: Vec<usize> = (0..population.len()).collect();
        let mut indices = Vec::with_capacity(n);

        for _ in 0..n {
            let mut best = rng.random_range(0..pool.len());
            for _ in 1..m {
                let idx = rng.random_range(0..pool.len());
                if scores[pool[idx]] > scores[pool[best]] {
                    best = idx;
                }
            }
            if self.replacement {
                indices.push(pool[best]);
            } else {
                indices.push(pool.remove(best));
            }
        }
        pick(population, indices)
    }
}

/// Rank-based schemas: a weight per rank, sampled proportionally.
pub trait RankWeights {
    /// Weight of the member at `rank` (0 = least fit).
    fn weight(&self, rank: usize) -> f64;

    /// Weights of a population's members in ascending fitness order.
    fn weights<C>(&self, population: &Population<C>) -> Vec<f64>
    where
        Self: Sized,
    {
        (0..population.len()).map(|rank| self.weight(rank)).collect()
    }
}

/// Roulette wheel over ranks: rank `i` weighs `i`.
///
/// The least fit member weighs zero, so with replacement it is never drawn
/// while any other member exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouletteWheel {
    replacement: bool,
}

impl RouletteWheel {
    pub fn new(replacement: bool) -> Self {
        Self { replacement }
    }
}

impl RankWeights for RouletteWheel {
    fn weight(&self, rank: usize) -> f64 {
        rank as f64
    }
}

/// Exponential ranking: rank `i` weighs `(i + 1)^alpha`.
///
/// `alpha = 0` is uniform; larger values favor the top ranks sharply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRank {
    pub alpha: f64,
    replacement: bool,
}

impl ExponentialRank {
    pub fn new(alpha: f64, replacement: bool) -> Self {
        Self { alpha, replacement }
    }
}

impl RankWeights for ExponentialRank {
    fn weight(&self, rank: usize) -> f64 {
        ((rank + 1) as f64).powf(self.alpha)
    }
}

/// Linear ranking: rank `i` weighs `alpha * (i + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRank {
    pub alpha: f64,
    replacement: bool,
}

impl LinearRank {
    pub fn new(alpha: f64, replacement: bool) -> Self {
        Self { alpha, replacement }
    }
}

impl RankWeights for LinearRank {
    fn weight(&self, rank: usize) -> f64 {
        self.alpha * (rank + 1) as f64
    }
}

macro_rules! rank_selection {
    ($($schema:ty),+) => {$(
        impl<C: Clone> Selection<C> for $schema {
            fn replacement(&self) -> bool {
                self.replacement
            }

            fn sample(
                &self,
                population: &Population<C>,
                n: usize,
                rng: &mut dyn RngCore,
            ) -> Vec<Genotype<C>> {
                let weights = self.weights(population);
                let indices = weighted_ranks(population, &weights, n, self.replacement, rng);
                pick(population, indices)
            }
        }
    )+};
}

rank_selection!(RouletteWheel, ExponentialRank, LinearRank);

/// Samples `n` population indices, weighting rank `i` by `weights[i]`.
fn weighted_ranks<C>(
    population: &Population<C>,
    weights: &[f64],
    n: usize,
    replacement: bool,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    let mut ranking = population.ranking();
    let mut weights = weights.to_vec();
    let mut indices = Vec::with_capacity(n);

    for _ in 0..n {
        let i = spin(&weights, rng);
        if replacement {
            indices.push(ranking[i]);
        } else {
            indices.push(ranking.remove(i));
            weights.remove(i);
        }
    }
    indices
}

/// Spins a roulette wheel with the given slot widths.
///
/// Zero-width slots are never hit unless every slot is zero, in which case
/// the draw is uniform.
fn spin(weights: &[f64], rng: &mut dyn RngCore) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..weights.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    // floating-point fallback
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}

fn pick<C: Clone>(population: &Population<C>, indices: Vec<usize>) -> Vec<Genotype<C>> {
    indices.into_iter().map(|i| population[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::{fitness_fn, FitnessFn};
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn first_gene() -> FitnessFn<Vec<i64>> {
        fitness_fn(|c: &Vec<i64>| c[0] as f64)
    }

    fn build_population(size: usize) -> Population<Vec<i64>> {
        let mut population = Population::new(size, first_gene());
        for i in 0..size as i64 {
            population.push(Genotype::new(vec![i])).unwrap();
        }
        population
    }

    fn ids(selected: &[Genotype<Vec<i64>>]) -> Vec<i64> {
        selected.iter().map(|g| g[0]).collect()
    }

    fn schemas(replacement: bool) -> Vec<Box<dyn Selection<Vec<i64>>>> {
        vec![
            Box::new(MonteCarlo::new(replacement)),
            Box::new(Truncation::new(replacement)),
            Box::new(Tournament::new(2, replacement)),
            Box::new(RouletteWheel::new(replacement)),
            Box::new(ExponentialRank::new(4.0, replacement)),
            Box::new(LinearRank::new(2.0, replacement)),
        ]
    }

    #[test]
    fn test_replacement_flag() {
        for schema in schemas(false) {
            assert!(!schema.replacement());
        }
        for schema in schemas(true) {
            assert!(schema.replacement());
        }
    }

    #[test]
    fn test_population_cannot_be_empty() {
        let population = Population::new(10, first_gene());
        let mut rng = create_rng(42);
        for schema in schemas(true) {
            assert_eq!(
                schema.select(&population, 2, &mut rng),
                Err(GaError::EmptyPopulation)
            );
        }
    }

    #[test]
    fn test_selection_size_cannot_be_zero() {
        let population = build_population(42);
        let mut rng = create_rng(42);
        for schema in schemas(false) {
            assert_eq!(
                schema.select(&population, 0, &mut rng),
                Err(GaError::WrongSelectionSize(0))
            );
        }
    }

    #[test]
    fn test_cannot_select_more_than_population_without_replacement() {
        let mut rng = create_rng(42);
        for schema in schemas(false) {
            for size in 2..=6 {
                let population = build_population(size);
                for n in [size + 1, size + 10] {
                    assert_eq!(
                        schema.select(&population, n, &mut rng),
                        Err(GaError::CannotSelectThatMany {
                            requested: n,
                            available: size
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_selected_count_without_replacement_is_unique() {
        let mut rng = create_rng(42);
        for schema in schemas(false) {
            for size in 2..=6 {
                let population = build_population(size);
                for n in 1..=size {
                    let selected = schema.select(&population, n, &mut rng).unwrap();
                    assert_eq!(selected.len(), n);
                    let unique: HashSet<i64> = ids(&selected).into_iter().collect();
                    assert_eq!(unique.len(), n);
                }
            }
        }
    }

    #[test]
    fn test_selected_count_with_replacement() {
        let mut rng = create_rng(42);
        for schema in schemas(true) {
            for size in 2..=6 {
                let population = build_population(size);
                for n in (1..=5 * size).step_by(2) {
                    let selected = schema.select(&population, n, &mut rng).unwrap();
                    assert_eq!(selected.len(), n);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_selection() {
        let population = build_population(10);
        for replacement in [true, false] {
            for schema in schemas(replacement) {
                let a = schema.select(&population, 5, &mut create_rng(42)).unwrap();
                let b = schema.select(&population, 5, &mut create_rng(42)).unwrap();
                assert_eq!(ids(&a), ids(&b));
            }
        }
    }

    #[test]
    fn test_selection_keeps_identity() {
        let population = build_population(5);
        let mut rng = create_rng(1);
        let selected = MonteCarlo::new(false).select(&population, 5, &mut rng).unwrap();
        for g in &selected {
            assert!(population.contains_id(g));
        }
    }

    #[test]
    fn test_truncation() {
        let population = build_population(10);
        let mut rng = create_rng(42);

        let selected = Truncation::new(true).select(&population, 10, &mut rng).unwrap();
        assert_eq!(ids(&selected), vec![9; 10]);

        let selected = Truncation::new(false).select(&population, 10, &mut rng).unwrap();
        assert_eq!(ids(&selected), vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);

        let selected = Truncation::new(false).select(&population, 5, &mut rng).unwrap();
        assert_eq!(ids(&selected), vec![9, 8, 7, 6, 5]);
    }

    #[test]
    fn test_truncation_ignores_member_order() {
        let mut population = Population::new(4, first_gene());
        for g in [2, 0, 3, 1] {
            population.push(Genotype::new(vec![g])).unwrap();
        }
        let selected = Truncation::new(false)
            .select(&population, 2, &mut create_rng(0))
            .unwrap();
        assert_eq!(ids(&selected), vec![3, 2]);
        assert!(!population.is_sorted());
    }

    #[test]
    fn test_monte_carlo_is_uniform() {
        let population = build_population(4);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        let n = 10_000;
        for g in MonteCarlo::new(true).select(&population, n, &mut rng).unwrap() {
            counts[g[0] as usize] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let population = build_population(4);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for g in Tournament::new(4, true).select(&population, 10_000, &mut rng).unwrap() {
            counts[g[0] as usize] += 1;
        }
        // P(best in 4 draws) = 1 - (3/4)^4 ~ 0.68
        assert!(counts[3] > 6000, "counts: {counts:?}");
        assert!(counts[3] > counts[2] && counts[2] > counts[1] && counts[1] > counts[0]);
    }

    #[test]
    fn test_tournament_size_one_is_random() {
        let population = build_population(4);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for g in Tournament::new(1, true).select(&population, 10_000, &mut rng).unwrap() {
            counts[g[0] as usize] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_weights() {
        for (size, expected) in [
            (2, vec![0.0, 1.0]),
            (4, vec![0.0, 1.0, 2.0, 3.0]),
            (8, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        ] {
            assert_eq!(RouletteWheel::new(false).weights(&build_population(size)), expected);
        }
    }

    #[test]
    fn test_exponential_rank_weights() {
        let weights = ExponentialRank::new(4.0, false).weights(&build_population(8));
        let expected = [1.0, 16.0, 81.0, 256.0, 625.0, 1296.0, 2401.0, 4096.0];
        for (w, e) in weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-9);
        }
        let uniform = ExponentialRank::new(0.0, false).weights(&build_population(4));
        assert_eq!(uniform, vec![1.0; 4]);
    }

    #[test]
    fn test_linear_rank_weights() {
        let weights = LinearRank::new(2.0, false).weights(&build_population(4));
        assert_eq!(weights, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_roulette_never_picks_zero_weight_with_replacement() {
        let population = build_population(5);
        let mut rng = create_rng(42);
        let selected = RouletteWheel::new(true).select(&population, 2000, &mut rng).unwrap();
        assert!(ids(&selected).iter().all(|&id| id != 0));
    }

    #[test]
    fn test_roulette_without_replacement_exhausts_population() {
        let population = build_population(10);
        let mut rng = create_rng(42);
        let selected = RouletteWheel::new(false).select(&population, 10, &mut rng).unwrap();
        let mut got = ids(&selected);
        // The zero-weight member can only come out once the others are gone.
        assert_eq!(got.last(), Some(&0));
        got.sort();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_member_zero_weight() {
        let population = build_population(1);
        let mut rng = create_rng(42);
        let selected = RouletteWheel::new(true).select(&population, 3, &mut rng).unwrap();
        assert_eq!(ids(&selected), vec![0, 0, 0]);
    }

    #[test]
    fn test_rank_pressure() {
        let population = build_population(10);
        let mut rng = create_rng(42);
        for schema in [
            Box::new(ExponentialRank::new(4.0, true)) as Box<dyn Selection<Vec<i64>>>,
            Box::new(LinearRank::new(2.0, true)),
            Box::new(RouletteWheel::new(true)),
        ] {
            let mut counts = [0u32; 10];
            for g in schema.select(&population, 5000, &mut rng).unwrap() {
                counts[g[0] as usize] += 1;
            }
            assert!(counts[9] > counts[1], "counts: {counts:?}");
        }
    }

    #[test]
    fn test_spin_fallbacks() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            assert!(spin(&[0.0, 0.0, 0.0], &mut rng) < 3);
            assert_eq!(spin(&[0.0, 1.0, 0.0], &mut rng), 1);
        }
    }
}
