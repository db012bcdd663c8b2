//! Recombination schemas for list genotypes.
//!
//! Every schema takes two parents and breeds two children. Position-based
//! schemas work over the common prefix of both parents: beyond the length
//! of the shorter one each child keeps its own parent's tail.
//!
//! The randomised operators draw their cut points or masks and delegate to
//! a deterministic function exported here as well.
//!
//! # Schemas
//!
//! - [`NPivot`]: alternate segments between `n` random pivots
//! - [`RandomMask`]: uniform crossover, one coin flip per gene
//! - [`Pmx`]: partially mapped crossover, keeps absolute positions
//! - [`OrderCrossover`]: keeps relative order (Davis' OX)
//! - [`RangeCrossover`]: integer genes drawn around both parents' values
//! - [`GeneralisedCrossover`]: binary genotypes read as integers
//! - [`PlainRecombination`] and [`FlexibleRecombination`]: real genes drawn
//!   between (or around) both parents' values
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use super::initializer::{interval_bounds, ordered_bounds};
use super::ListGenotype;
use crate::error::{GaError, Result};
use crate::ga::{Genotype, Recombination};
use crate::random::take_chances;
use rand::{Rng, RngCore};

fn offspring<T>(first: Vec<T>, second: Vec<T>) -> Vec<ListGenotype<T>> {
    vec![Genotype::new(first), Genotype::new(second)]
}

/// Forks whatever was received when the arity contract is broken.
fn passthrough<T: Clone>(parents: &[ListGenotype<T>]) -> Vec<ListGenotype<T>> {
    parents.iter().map(Genotype::fork).collect()
}

/// Two random cut points in `0..=len`, sorted.
fn random_segment(len: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let a = rng.random_range(0..=len);
    let b = rng.random_range(0..=len);
    (a.min(b), a.max(b))
}

// ============================================================================
// N-pivot
// ============================================================================

/// Crosses two gene lists at the given pivots.
///
/// `pivots` are sorted positions in `1..min_len`. Segments between
/// consecutive pivots alternate between the own parent and the other one,
/// starting with the own parent.
///
/// ```
/// use u_genetic::list::n_pivot;
///
/// let (a, b) = n_pivot(&[1, 1, 1, 1, 1, 1], &[0, 0, 0, 0, 0, 0], &[1, 2, 3]);
/// assert_eq!(a, vec![1, 0, 1, 0, 0, 0]);
/// assert_eq!(b, vec![0, 1, 0, 1, 1, 1]);
/// ```
pub fn n_pivot<T: Clone>(first: &[T], second: &[T], pivots: &[usize]) -> (Vec<T>, Vec<T>) {
    let len = first.len().min(second.len());
    let mut child1 = first.to_vec();
    let mut child2 = second.to_vec();

    let mut start = 0;
    for (segment, end) in pivots.iter().copied().chain([len]).enumerate() {
        let end = end.clamp(start, len);
        if segment % 2 == 1 {
            for i in start..end {
                std::mem::swap(&mut child1[i], &mut child2[i]);
            }
        }
        start = end;
    }
    (child1, child2)
}

/// Crossover at `pivots` random cut points.
///
/// The number of pivots is capped at `min_len - 1`, so asking for more
/// than there are gaps between genes cuts at every gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NPivot {
    pivots: usize,
}

impl NPivot {
    pub fn new(pivots: usize) -> Self {
        Self { pivots }
    }

    /// Classic one-point crossover.
    pub fn one() -> Self {
        Self::new(1)
    }

    /// Two-point crossover.
    pub fn two() -> Self {
        Self::new(2)
    }

    pub fn pivots(&self) -> usize {
        self.pivots
    }
}

impl<T: Clone> Recombination<Vec<T>> for NPivot {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<T>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<T>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let len = first.len().min(second.len());
        let count = self.pivots.min(len.saturating_sub(1));
        let gaps = len.saturating_sub(1);
        let mut pivots: Vec<usize> = rand::seq::index::sample(rng, gaps, count)
            .iter()
            .map(|i| i + 1)
            .collect();
        pivots.sort_unstable();

        let (child1, child2) = n_pivot(first.chromosome(), second.chromosome(), &pivots);
        offspring(child1, child2)
    }
}

// ============================================================================
// Random mask
// ============================================================================

/// Crosses two gene lists following `mask`.
///
/// Positions where the mask is `true` keep their own parent's gene; the
/// others are exchanged. Positions beyond the mask are kept.
pub fn masked<T: Clone>(first: &[T], second: &[T], mask: &[bool]) -> (Vec<T>, Vec<T>) {
    let mut child1 = first.to_vec();
    let mut child2 = second.to_vec();
    let len = child1.len().min(child2.len());
    for (i, &keep) in mask.iter().enumerate().take(len) {
        if !keep {
            std::mem::swap(&mut child1[i], &mut child2[i]);
        }
    }
    (child1, child2)
}

/// Uniform crossover: each gene is exchanged with probability one half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomMask;

impl<T: Clone> Recombination<Vec<T>> for RandomMask {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<T>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<T>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let len = first.len().min(second.len());
        let mask: Vec<bool> = (0..len).map(|_| take_chances(0.5, rng)).collect();
        let (child1, child2) = masked(first.chromosome(), second.chromosome(), &mask);
        offspring(child1, child2)
    }
}

// ============================================================================
// PMX
// ============================================================================

/// Partially mapped crossover over the segment `[start, end)`.
///
/// The first child takes the second parent's segment and fills the other
/// positions from the first parent. A gene that already appears in the
/// copied segment is replaced by following the mapping between both
/// segments until a free gene is found. The second child mirrors it.
///
/// Cut points are reordered when swapped and clamped to the common length.
///
/// ```
/// use u_genetic::list::pmx;
///
/// let p1: Vec<char> = "34827165".chars().collect();
/// let p2: Vec<char> = "42516837".chars().collect();
/// let (c1, c2) = pmx(&p1, &p2, 3, 6);
/// assert_eq!(c1.iter().collect::<String>(), "34216875");
/// assert_eq!(c2.iter().collect::<String>(), "48527136");
/// ```
pub fn pmx<T: Clone + PartialEq>(
    first: &[T],
    second: &[T],
    start: usize,
    end: usize,
) -> (Vec<T>, Vec<T>) {
    let len = first.len().min(second.len());
    let (start, end) = (start.min(end).min(len), start.max(end).min(len));
    (
        pmx_build_child(first, second, start, end),
        pmx_build_child(second, first, start, end),
    )
}

/// Build one PMX child: segment from `donor`, the rest mapped from `own`.
fn pmx_build_child<T: Clone + PartialEq>(
    own: &[T],
    donor: &[T],
    start: usize,
    end: usize,
) -> Vec<T> {
    let segment = &donor[start..end];
    let mut child = own.to_vec();
    child[start..end].clone_from_slice(segment);

    for i in (0..start).chain(end..own.len().min(donor.len())) {
        let mut gene = &own[i];
        // A chain longer than the segment only happens with repeated genes.
        for _ in 0..segment.len() {
            match segment.iter().position(|g| g == gene) {
                Some(k) => gene = &own[start + k],
                None => break,
            }
        }
        child[i] = gene.clone();
    }
    child
}

/// Partially mapped crossover (Goldberg & Lingle) at a random segment.
///
/// Children of two permutations of the same symbols are permutations too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pmx;

impl<T: Clone + PartialEq> Recombination<Vec<T>> for Pmx {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<T>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<T>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let (start, end) = random_segment(first.len().min(second.len()), rng);
        let (child1, child2) = pmx(first.chromosome(), second.chromosome(), start, end);
        offspring(child1, child2)
    }
}

// ============================================================================
// Order crossover
// ============================================================================

/// Order crossover (OX) over the segment `[start, end)`.
///
/// Each child keeps its own parent's segment; the remaining positions,
/// starting after the segment and wrapping around, receive the other
/// parent's genes in their order, skipping those already in the segment.
///
/// Parents of different lengths are returned unchanged.
///
/// ```
/// use u_genetic::list::order_crossover;
///
/// let (c1, c2) = order_crossover(&[1, 2, 3, 4, 5, 6], &[6, 5, 4, 3, 2, 1], 2, 4);
/// assert_eq!(c1, vec![6, 5, 3, 4, 2, 1]);
/// assert_eq!(c2, vec![1, 2, 4, 3, 5, 6]);
/// ```
pub fn order_crossover<T: Clone + PartialEq>(
    first: &[T],
    second: &[T],
    start: usize,
    end: usize,
) -> (Vec<T>, Vec<T>) {
    if first.len() != second.len() {
        return (first.to_vec(), second.to_vec());
    }
    let len = first.len();
    let (start, end) = (start.min(end).min(len), start.max(end).min(len));
    (
        ox_build_child(first, second, start, end),
        ox_build_child(second, first, start, end),
    )
}

/// Build one OX child: keep segment from `template`, fill from `donor`.
fn ox_build_child<T: Clone + PartialEq>(
    template: &[T],
    donor: &[T],
    start: usize,
    end: usize,
) -> Vec<T> {
    let n = template.len();
    let mut child = template.to_vec();
    if start == end || n == 0 {
        return child;
    }

    // Segment genes still unmatched in the donor; repeated genes count once each.
    let mut pending: Vec<&T> = template[start..end].iter().collect();
    let fill = (0..n).map(|offset| &donor[(end + offset) % n]).filter(|gene| {
        match pending.iter().position(|p| p == gene) {
            Some(k) => {
                pending.swap_remove(k);
                false
            }
            None => true,
        }
    });

    for (pos, gene) in (end..n).chain(0..start).zip(fill) {
        child[pos] = gene.clone();
    }
    child
}

/// Order crossover (Davis) at a random segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCrossover;

impl<T: Clone + PartialEq> Recombination<Vec<T>> for OrderCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<T>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<T>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let (start, end) = random_segment(first.len().min(second.len()), rng);
        let (child1, child2) =
            order_crossover(first.chromosome(), second.chromosome(), start, end);
        offspring(child1, child2)
    }
}

// ============================================================================
// Range crossover
// ============================================================================

/// Integer crossover drawing each gene around both parents' values.
///
/// For genes `a` and `b` the spread is `|a - b|`, or the whole interval
/// width when they are equal. The first child's gene is drawn uniformly
/// from the parents' range widened by that spread; the second child gets
/// its mirror `a + b - g`. Both are clamped into `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCrossover {
    lower: i64,
    upper: i64,
}

impl RangeCrossover {
    /// Swapped bounds are reordered.
    ///
    /// # Errors
    /// [`GaError::BoundsCannotBeTheSame`](crate::GaError::BoundsCannotBeTheSame)
    /// when `lower == upper`.
    pub fn new(lower: i64, upper: i64) -> Result<Self> {
        let (lower, upper) = ordered_bounds(lower, upper)?;
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    fn cross(&self, a: i64, b: i64, rng: &mut dyn RngCore) -> (i64, i64) {
        // Widened so that no extreme pair of genes overflows.
        let (a, b) = (i128::from(a), i128::from(b));
        let spread = if a == b {
            i128::from(self.upper) - i128::from(self.lower)
        } else {
            (a - b).abs()
        };
        let (low, high) = (a.min(b) - spread, a.max(b) + spread);
        let g1 = rng.random_range(low..=high);
        let g2 = a + b - g1;
        (self.clamp(g1), self.clamp(g2))
    }

    fn clamp(&self, gene: i128) -> i64 {
        let clamped = gene.clamp(i128::from(self.lower), i128::from(self.upper));
        // In [lower, upper], so within i64.
        clamped as i64
    }
}

impl Recombination<Vec<i64>> for RangeCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<i64>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<i64>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let mut child1 = first.chromosome().clone();
        let mut child2 = second.chromosome().clone();
        for (g1, g2) in child1.iter_mut().zip(child2.iter_mut()) {
            (*g1, *g2) = self.cross(*g1, *g2, rng);
        }
        offspring(child1, child2)
    }
}

// ============================================================================
// Generalised crossover
// ============================================================================

/// Longest binary genotype [`generalised_crossover`] can read as a number.
pub const GENERALISED_MAX_BITS: usize = 127;

fn bits_to_number(bits: &[u8]) -> u128 {
    bits.iter()
        .fold(0, |acc, &bit| (acc << 1) | u128::from(bit != 0))
}

fn number_to_bits(value: u128, len: usize) -> Vec<u8> {
    (0..len)
        .rev()
        .map(|shift| ((value >> shift) & 1) as u8)
        .collect()
}

/// Values the first child may take so that both children fit in `len` bits.
fn generalised_range(x: u128, y: u128, len: usize) -> (u128, u128) {
    let max = (1u128 << len) - 1;
    let sum = x + y;
    (sum.saturating_sub(max), sum.min(max))
}

/// Generalised crossover of two binary gene lists.
///
/// Both parents are read as unsigned integers, most significant gene first
/// (any non-zero gene is a `1`). The first child encodes `value`, the
/// second one `x + y - value`, so the sum of both parents is preserved.
/// `value` is clamped into the range where both children fit in the
/// parents' length.
///
/// Parents of different lengths, or longer than
/// [`GENERALISED_MAX_BITS`], are returned unchanged.
///
/// ```
/// use u_genetic::list::generalised_crossover;
///
/// let (a, b) = generalised_crossover(&[0, 1, 1, 1], &[1, 0, 0, 0], 3);
/// assert_eq!(a, vec![0, 0, 1, 1]);
/// assert_eq!(b, vec![1, 1, 0, 0]);
/// ```
pub fn generalised_crossover(first: &[u8], second: &[u8], value: u128) -> (Vec<u8>, Vec<u8>) {
    let len = first.len();
    if len != second.len() || len > GENERALISED_MAX_BITS {
        return (first.to_vec(), second.to_vec());
    }
    let (x, y) = (bits_to_number(first), bits_to_number(second));
    let (low, high) = generalised_range(x, y, len);
    let value = value.clamp(low, high);
    (number_to_bits(value, len), number_to_bits(x + y - value, len))
}

/// Generalised crossover with the first child drawn uniformly.
///
/// Every value for which both children fit in the parents' length is
/// equally likely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralisedCrossover;

impl Recombination<Vec<u8>> for GeneralisedCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<u8>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<u8>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let len = first.len();
        if len != second.len() || len > GENERALISED_MAX_BITS {
            return passthrough(parents);
        }
        let (first, second) = (first.chromosome(), second.chromosome());
        let (x, y) = (bits_to_number(first), bits_to_number(second));
        let (low, high) = generalised_range(x, y, len);
        let value = rng.random_range(low..=high);

        let (child1, child2) = generalised_crossover(first, second, value);
        offspring(child1, child2)
    }
}

// ============================================================================
// Real-valued recombinations
// ============================================================================

/// Uniform value in `[low, high]` that never overflows for finite bounds.
fn draw_between(low: f64, high: f64, rng: &mut dyn RngCore) -> f64 {
    let t: f64 = rng.random();
    (low * (1.0 - t) + high * t).max(low).min(high)
}

/// Crosses two real gene lists at the given drawn values.
///
/// The first child takes `drawn[i]`; the second one its mirror
/// `a + b - drawn[i]`, where `a` and `b` are the parents' genes. Positions
/// beyond `drawn` or the shorter parent are kept.
///
/// ```
/// use u_genetic::list::plain_recombination;
///
/// let (a, b) = plain_recombination(&[0.0, 0.0], &[1.0, 1.0], &[0.25, 0.25]);
/// assert_eq!(a, vec![0.25, 0.25]);
/// assert_eq!(b, vec![0.75, 0.75]);
/// ```
pub fn plain_recombination(first: &[f64], second: &[f64], drawn: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut child1 = first.to_vec();
    let mut child2 = second.to_vec();
    for ((g1, g2), &value) in child1.iter_mut().zip(child2.iter_mut()).zip(drawn) {
        *g2 = *g1 + *g2 - value;
        *g1 = value;
    }
    (child1, child2)
}

/// Real crossover drawing each gene between both parents' values.
///
/// The second child's gene mirrors the first one around the parents'
/// midpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainRecombination;

impl Recombination<Vec<f64>> for PlainRecombination {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<f64>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<f64>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let drawn: Vec<f64> = first
            .iter()
            .zip(second.iter())
            .map(|(&a, &b)| draw_between(a.min(b), a.max(b), rng))
            .collect();
        let (child1, child2) = plain_recombination(first.chromosome(), second.chromosome(), &drawn);
        offspring(child1, child2)
    }
}

/// Real crossover drawing each gene around both parents' values (BLX-α).
///
/// For genes `a` and `b` the draw interval is `[min - α·d, max + α·d]`,
/// where `d` is `|a - b|`, or the whole interval width when they are
/// equal. The second child mirrors the first one as in
/// [`plain_recombination`], and both are clamped into `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexibleRecombination {
    lower: f64,
    upper: f64,
    alpha: f64,
}

impl FlexibleRecombination {
    /// Swapped bounds are reordered.
    ///
    /// # Errors
    /// - [`GaError::BoundsCannotBeTheSame`](crate::GaError::BoundsCannotBeTheSame)
    ///   when `lower == upper`
    /// - [`GaError::InvalidConfig`](crate::GaError::InvalidConfig) when the
    ///   interval is not finite or `alpha` is negative or not finite
    pub fn new(lower: f64, upper: f64, alpha: f64) -> Result<Self> {
        let (lower, upper) = interval_bounds(lower, upper)?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(GaError::InvalidConfig(format!(
                "alpha must be finite and non-negative, got {alpha}"
            )));
        }
        Ok(Self {
            lower,
            upper,
            alpha,
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// [`plain_recombination`] at `drawn`, clamped into `[lower, upper]`.
    ///
    /// ```
    /// use u_genetic::list::FlexibleRecombination;
    ///
    /// let recombination = FlexibleRecombination::new(0.0, 1.0, 0.1).unwrap();
    /// let (a, b) = recombination.cross_at(&[1.0], &[0.0], &[1.05]);
    /// assert_eq!((a, b), (vec![1.0], vec![0.0]));
    /// ```
    pub fn cross_at(&self, first: &[f64], second: &[f64], drawn: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let (mut child1, mut child2) = plain_recombination(first, second, drawn);
        let len = first.len().min(second.len()).min(drawn.len());
        for gene in child1[..len].iter_mut().chain(child2[..len].iter_mut()) {
            *gene = gene.clamp(self.lower, self.upper);
        }
        (child1, child2)
    }

    fn draw(&self, a: f64, b: f64, rng: &mut dyn RngCore) -> f64 {
        let distance = if a == b {
            self.upper - self.lower
        } else {
            (a - b).abs()
        };
        let spread = self.alpha * distance;
        let (low, high) = (a.min(b) - spread, a.max(b) + spread);
        if (high - low).is_finite() {
            draw_between(low, high, rng)
        } else {
            draw_between(self.lower, self.upper, rng)
        }
    }
}

impl Recombination<Vec<f64>> for FlexibleRecombination {
    fn arity(&self) -> usize {
        2
    }

    fn recombine(
        &self,
        parents: &[ListGenotype<f64>],
        rng: &mut dyn RngCore,
    ) -> Vec<ListGenotype<f64>> {
        let [first, second] = parents else {
            return passthrough(parents);
        };
        let drawn: Vec<f64> = first
            .iter()
            .zip(second.iter())
            .map(|(&a, &b)| self.draw(a, b, rng))
            .collect();
        let (child1, child2) = self.cross_at(first.chromosome(), second.chromosome(), &drawn);
        offspring(child1, child2)
    }
}
