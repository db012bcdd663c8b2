//! Core data definitions for the GA framework.
//!
//! A [`Genotype`] wraps a problem-specific chromosome `C` together with the
//! fitness function of the population it belongs to, a lazily computed
//! fitness cache and the ids of the genotypes it was bred from.

use super::population::Population;
use crate::error::{GaError, Result};
use rand::RngCore;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared fitness function. Higher values are better.
///
/// A population hands the same `Arc` to each of its members, so swapping
/// the function on the population reaches every genotype.
pub type FitnessFn<C> = Arc<dyn Fn(&C) -> f64 + Send + Sync>;

/// Wraps a closure into a [`FitnessFn`].
///
/// ```
/// use u_genetic::ga::fitness_fn;
///
/// let ones = fitness_fn(|genes: &Vec<u8>| genes.iter().map(|&g| g as f64).sum());
/// assert_eq!(ones(&vec![1, 0, 1]), 2.0);
/// ```
pub fn fitness_fn<C, F>(f: F) -> FitnessFn<C>
where
    F: Fn(&C) -> f64 + Send + Sync + 'static,
{
    Arc::new(f)
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a genotype.
///
/// Clones share the id of their source; [`Genotype::new`] and
/// [`Genotype::fork`] allocate a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenotypeId(u64);

impl GenotypeId {
    fn next() -> Self {
        GenotypeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenotypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate solution.
///
/// Genotypes behave as values: selection and replacement clone them, and
/// mutation operators [`fork`](Genotype::fork) before writing, so a
/// population is never modified through another population's copy.
///
/// ```
/// use u_genetic::ga::{fitness_fn, Genotype};
///
/// let mut g = Genotype::new(vec![1, 1, 0]);
/// assert!(g.fitness().is_err());
///
/// g.set_fitness_function(fitness_fn(|c: &Vec<i32>| c.iter().sum::<i32>() as f64));
/// assert_eq!(g.fitness(), Ok(2.0));
/// assert_eq!(g.len(), 3);
/// ```
#[derive(Clone)]
pub struct Genotype<C> {
    id: GenotypeId,
    chromosome: C,
    fitness_fn: Option<FitnessFn<C>>,
    fitness: OnceLock<f64>,
    parents: Vec<GenotypeId>,
}

impl<C> Genotype<C> {
    /// Creates a genotype without fitness function nor lineage.
    pub fn new(chromosome: C) -> Self {
        Self {
            id: GenotypeId::next(),
            chromosome,
            fitness_fn: None,
            fitness: OnceLock::new(),
            parents: Vec::new(),
        }
    }

    /// Identity of this genotype.
    pub fn id(&self) -> GenotypeId {
        self.id
    }

    /// The gene container.
    pub fn chromosome(&self) -> &C {
        &self.chromosome
    }

    /// Mutable access to the genes. Invalidates the cached fitness.
    pub fn chromosome_mut(&mut self) -> &mut C {
        self.fitness = OnceLock::new();
        &mut self.chromosome
    }

    /// Consumes the genotype, returning its genes.
    pub fn into_chromosome(self) -> C {
        self.chromosome
    }

    /// The attached fitness function, if any.
    pub fn fitness_function(&self) -> Option<&FitnessFn<C>> {
        self.fitness_fn.as_ref()
    }

    /// Whether `f` is the very function attached to this genotype.
    pub fn uses_fitness_function(&self, f: &FitnessFn<C>) -> bool {
        self.fitness_fn
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, f))
    }

    /// Attaches a fitness function.
    ///
    /// Re-attaching the function already in place keeps the cached value;
    /// any other function discards it.
    pub fn set_fitness_function(&mut self, f: FitnessFn<C>) {
        if self.uses_fitness_function(&f) {
            return;
        }
        self.fitness_fn = Some(f);
        self.fitness = OnceLock::new();
    }

    /// Fitness of this genotype, computed on first access.
    ///
    /// # Errors
    /// [`GaError::NoFitnessFunction`] if no function is attached.
    pub fn fitness(&self) -> Result<f64> {
        let f = self.fitness_fn.as_ref().ok_or(GaError::NoFitnessFunction)?;
        Ok(*self.fitness.get_or_init(|| f(&self.chromosome)))
    }

    /// Fitness using the attached function, or `fallback` when none is set.
    pub(crate) fn fitness_or(&self, fallback: &FitnessFn<C>) -> f64 {
        let f = self.fitness_fn.as_ref().unwrap_or(fallback);
        *self.fitness.get_or_init(|| f(&self.chromosome))
    }

    /// Ids of the genotypes this one was bred from.
    pub fn parents(&self) -> &[GenotypeId] {
        &self.parents
    }

    /// Records `parents` as ancestors of this genotype.
    pub fn add_parents(&mut self, parents: &[Genotype<C>]) {
        self.parents.extend(parents.iter().map(Genotype::id));
    }
}

impl<C: Clone> Genotype<C> {
    /// Copy with a fresh id and no cached fitness.
    ///
    /// Keeps the fitness function and lineage. Mutation operators call this
    /// before their first write.
    pub fn fork(&self) -> Self {
        Self {
            id: GenotypeId::next(),
            chromosome: self.chromosome.clone(),
            fitness_fn: self.fitness_fn.clone(),
            fitness: OnceLock::new(),
            parents: self.parents.clone(),
        }
    }
}

impl<C> Deref for Genotype<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.chromosome
    }
}

impl<C: PartialEq> PartialEq for Genotype<C> {
    fn eq(&self, other: &Self) -> bool {
        self.chromosome == other.chromosome
    }
}

impl<C: fmt::Debug> fmt::Debug for Genotype<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genotype")
            .field("id", &self.id)
            .field("chromosome", &self.chromosome)
            .field("fitness", &self.fitness.get())
            .field("parents", &self.parents)
            .finish()
    }
}

impl<C> From<C> for Genotype<C> {
    fn from(chromosome: C) -> Self {
        Genotype::new(chromosome)
    }
}

/// Builds the genotypes of the first generation.
pub trait Initializer<C> {
    /// Creates one random genotype.
    fn create(&self, rng: &mut dyn RngCore) -> Genotype<C>;

    /// Pushes new genotypes until `population` is full.
    fn fill(&self, population: &mut Population<C>, rng: &mut dyn RngCore) -> Result<()> {
        while !population.is_full() {
            population.push(self.create(rng))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn sum() -> FitnessFn<Vec<i32>> {
        fitness_fn(|c: &Vec<i32>| c.iter().sum::<i32>() as f64)
    }

    #[test]
    fn test_no_fitness_function_after_creation() {
        let g = Genotype::new(vec![1, 2]);
        assert_eq!(g.fitness(), Err(GaError::NoFitnessFunction));
        assert!(g.fitness_function().is_none());
        assert!(g.parents().is_empty());
    }

    #[test]
    fn test_fitness_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let f = fitness_fn(move |c: &Vec<i32>| {
            counter.fetch_add(1, Ordering::SeqCst);
            c.len() as f64
        });

        let mut g = Genotype::new(vec![0; 4]);
        g.set_fitness_function(f.clone());
        assert_eq!(g.fitness(), Ok(4.0));
        assert_eq!(g.fitness(), Ok(4.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Same function again: cache survives.
        g.set_fitness_function(f);
        assert_eq!(g.fitness(), Ok(4.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Editing genes invalidates.
        g.chromosome_mut().push(0);
        assert_eq!(g.fitness(), Ok(5.0));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_new_fitness_function_invalidates() {
        let mut g = Genotype::new(vec![1, 2, 3]);
        g.set_fitness_function(sum());
        assert_eq!(g.fitness(), Ok(6.0));

        let neg = fitness_fn(|c: &Vec<i32>| -(c.iter().sum::<i32>() as f64));
        g.set_fitness_function(neg.clone());
        assert!(g.uses_fitness_function(&neg));
        assert_eq!(g.fitness(), Ok(-6.0));
    }

    #[test]
    fn test_equality_ignores_identity() {
        let a = Genotype::new(vec![1, 2]);
        let b = Genotype::new(vec![1, 2]);
        let c = Genotype::new(vec![2, 1]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_shares_id_fork_does_not() {
        let mut g = Genotype::new(vec![1]);
        g.set_fitness_function(sum());
        let clone = g.clone();
        let fork = g.fork();
        assert_eq!(clone.id(), g.id());
        assert_ne!(fork.id(), g.id());
        assert_eq!(fork, g);
        assert_eq!(fork.fitness(), Ok(1.0));
    }

    #[test]
    fn test_lineage() {
        let p1 = Genotype::new(vec![0]);
        let p2 = Genotype::new(vec![1]);
        let mut child = Genotype::new(vec![0, 1]);
        child.add_parents(&[p1.clone(), p2.clone()]);
        assert_eq!(child.parents(), &[p1.id(), p2.id()]);

        // Forks inherit the lineage of their source.
        assert_eq!(child.fork().parents(), child.parents());
    }

    #[test]
    fn test_deref() {
        let g = Genotype::new(vec![3, 4, 5]);
        assert_eq!(g.len(), 3);
        assert_eq!(g[1], 4);
        assert_eq!(g.into_chromosome(), vec![3, 4, 5]);
    }
}
