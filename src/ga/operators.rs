//! Recombination and mutation contracts.
//!
//! Both operators are plugged into the
//! [`GeneticAlgorithm`](super::GeneticAlgorithm) as trait objects. The
//! identity implementations [`NoRecombination`] and [`NoMutation`] are used
//! when the caller configures none, and [`RecombinationFn`] /
//! [`MutationFn`] adapt plain closures.
//!
//! Concrete operators for list encodings live in [`crate::list`].

use super::types::Genotype;
use crate::random::Probability;
use rand::RngCore;
use std::fmt;

// ============================================================================
// Recombination
// ============================================================================

/// Breeds progeny from a fixed number of parents.
///
/// The arity is declared rather than inferred: the algorithm selects
/// exactly [`arity`](Recombination::arity) parents for every call.
pub trait Recombination<C> {
    /// Number of parents consumed per call. Values below 1 behave as 1.
    fn arity(&self) -> usize;

    /// Produces progeny from `parents`, whose length equals `arity()`.
    ///
    /// Children must be new genotypes; the caller records the parents as
    /// their lineage.
    fn recombine(&self, parents: &[Genotype<C>], rng: &mut dyn RngCore) -> Vec<Genotype<C>>;
}

/// Identity recombination: one parent in, the same parent out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRecombination;

impl<C: Clone> Recombination<C> for NoRecombination {
    fn arity(&self) -> usize {
        1
    }

    fn recombine(&self, parents: &[Genotype<C>], _rng: &mut dyn RngCore) -> Vec<Genotype<C>> {
        parents.to_vec()
    }
}

/// Adapts a closure into a [`Recombination`] of the given arity.
///
/// ```
/// use u_genetic::ga::{Genotype, Recombination, RecombinationFn};
/// use u_genetic::random::create_rng;
///
/// type Parents = [Genotype<Vec<f64>>];
///
/// let average = RecombinationFn::new(2, |parents: &Parents, _rng: &mut dyn rand::RngCore| {
///     let genes = parents[0]
///         .iter()
///         .zip(parents[1].iter())
///         .map(|(a, b)| (a + b) / 2.0)
///         .collect::<Vec<_>>();
///     vec![Genotype::new(genes)]
/// });
///
/// let parents = [Genotype::new(vec![0.0, 2.0]), Genotype::new(vec![2.0, 4.0])];
/// let children = average.recombine(&parents, &mut create_rng(0));
/// assert_eq!(average.arity(), 2);
/// assert_eq!(children[0].chromosome(), &vec![1.0, 3.0]);
/// ```
#[derive(Clone)]
pub struct RecombinationFn<F> {
    arity: usize,
    f: F,
}

impl<F> RecombinationFn<F> {
    pub fn new(arity: usize, f: F) -> Self {
        Self { arity, f }
    }
}

impl<C, F> Recombination<C> for RecombinationFn<F>
where
    F: Fn(&[Genotype<C>], &mut dyn RngCore) -> Vec<Genotype<C>>,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn recombine(&self, parents: &[Genotype<C>], rng: &mut dyn RngCore) -> Vec<Genotype<C>> {
        (self.f)(parents, rng)
    }
}

impl<F> fmt::Debug for RecombinationFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecombinationFn")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Perturbs a genotype.
///
/// Implementations decide per gene whether to mutate, using `probability`.
/// A genotype that is not modified must be returned as is (same id); a
/// modified one must be a [`fork`](Genotype::fork), so copies held by other
/// populations stay untouched.
pub trait Mutation<C> {
    fn mutate(
        &self,
        probability: Probability,
        genotype: Genotype<C>,
        rng: &mut dyn RngCore,
    ) -> Genotype<C>;
}

/// Identity mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMutation;

impl<C> Mutation<C> for NoMutation {
    fn mutate(
        &self,
        _probability: Probability,
        genotype: Genotype<C>,
        _rng: &mut dyn RngCore,
    ) -> Genotype<C> {
        genotype
    }
}

/// Adapts a closure into a [`Mutation`].
#[derive(Clone)]
pub struct MutationFn<F> {
    f: F,
}

impl<F> MutationFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<C, F> Mutation<C> for MutationFn<F>
where
    F: Fn(Probability, Genotype<C>, &mut dyn RngCore) -> Genotype<C>,
{
    fn mutate(
        &self,
        probability: Probability,
        genotype: Genotype<C>,
        rng: &mut dyn RngCore,
    ) -> Genotype<C> {
        (self.f)(probability, genotype, rng)
    }
}

impl<F> fmt::Debug for MutationFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_no_recombination_returns_parent() {
        let parent = Genotype::new(vec![1, 2, 3]);
        let mut rng = create_rng(42);
        let children = NoRecombination.recombine(&[parent.clone()], &mut rng);
        assert_eq!(Recombination::<Vec<i32>>::arity(&NoRecombination), 1);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), parent.id());
    }

    #[test]
    fn test_recombination_fn_arity() {
        for arity in [1, 2, 4] {
            let copy = |parents: &[Genotype<Vec<i32>>], _: &mut dyn RngCore| -> Vec<_> {
                parents
                    .iter()
                    .map(|p| Genotype::new(p.chromosome().clone()))
                    .collect()
            };
            let r = RecombinationFn::new(arity, copy);
            assert_eq!(r.arity(), arity);

            let parents: Vec<_> = (0..arity as i32).map(|i| Genotype::new(vec![i])).collect();
            let children = r.recombine(&parents, &mut create_rng(42));
            assert_eq!(children.len(), arity);
            assert_eq!(children, parents);
        }
    }

    #[test]
    fn test_no_mutation_keeps_identity() {
        let g = Genotype::new(vec![0u8; 4]);
        let id = g.id();
        let mut rng = create_rng(42);
        let out = NoMutation.mutate(Probability::ONE, g, &mut rng);
        assert_eq!(out.id(), id);
    }

    #[test]
    fn test_mutation_fn_sees_probability() {
        let flip = |p: Probability, g: Genotype<Vec<bool>>, _: &mut dyn RngCore| {
            if p.value() < 1.0 {
                return g;
            }
            let mut child = g.fork();
            child.chromosome_mut().iter_mut().for_each(|b| *b = !*b);
            child
        };
        let flip_all = MutationFn::new(flip);
        let mut rng = create_rng(42);
        let g = Genotype::new(vec![true, false]);

        let same = flip_all.mutate(Probability::new(0.5), g.clone(), &mut rng);
        assert_eq!(same.id(), g.id());

        let flipped = flip_all.mutate(Probability::ONE, g.clone(), &mut rng);
        assert_ne!(flipped.id(), g.id());
        assert_eq!(flipped.chromosome(), &vec![false, true]);
        assert_eq!(g.chromosome(), &vec![true, false]);
    }
}
