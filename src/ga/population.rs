//! Capacity-bounded population container.
//!
//! [`Population`] keeps its members in order, never grows past
//! [`max_size`](Population::max_size) through insertion, and hands its
//! fitness function to every genotype it receives.

use super::types::{FitnessFn, Genotype};
use crate::error::{GaError, Result};
use std::fmt;
use std::ops::{Add, Index};

/// An ordered, capacity-bounded collection of genotypes.
///
/// Sorting is ascending by fitness: the worst genotype comes first and the
/// best one last.
///
/// ```
/// use u_genetic::ga::{fitness_fn, Genotype, Population};
///
/// let mut population = Population::new(2, fitness_fn(|c: &Vec<i32>| c[0] as f64));
/// population.push(Genotype::new(vec![5])).unwrap();
/// population.push(Genotype::new(vec![1])).unwrap();
/// assert!(population.is_full());
/// assert!(population.push(Genotype::new(vec![3])).is_err());
///
/// population.sort();
/// assert_eq!(population[1].chromosome(), &vec![5]);
/// ```
#[derive(Clone)]
pub struct Population<C> {
    genotypes: Vec<Genotype<C>>,
    max_size: usize,
    fitness: FitnessFn<C>,
    sorted: bool,
}

impl<C> Population<C> {
    /// Creates an empty population.
    pub fn new(max_size: usize, fitness: FitnessFn<C>) -> Self {
        Self {
            genotypes: Vec::with_capacity(max_size),
            max_size,
            fitness,
            sorted: false,
        }
    }

    /// Maximum number of genotypes insertion operations allow.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Changes the capacity.
    ///
    /// Shrinking below the current length keeps every member; the bound is
    /// only enforced by later insertions.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    /// The population's fitness function.
    pub fn fitness(&self) -> &FitnessFn<C> {
        &self.fitness
    }

    /// Replaces the fitness function and hands it to every member.
    pub fn set_fitness(&mut self, fitness: FitnessFn<C>) {
        for genotype in &mut self.genotypes {
            genotype.set_fitness_function(fitness.clone());
        }
        self.fitness = fitness;
        self.sorted = false;
    }

    /// Number of genotypes.
    pub fn len(&self) -> usize {
        self.genotypes.len()
    }

    /// Whether the population holds no genotype.
    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }

    /// Whether no more genotypes can be inserted.
    pub fn is_full(&self) -> bool {
        self.genotypes.len() >= self.max_size
    }

    /// Whether the current order is the result of [`sort`](Self::sort).
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Free slots before the population is full.
    pub fn remaining(&self) -> usize {
        self.max_size.saturating_sub(self.genotypes.len())
    }

    /// Appends one genotype.
    ///
    /// # Errors
    /// [`GaError::FullPopulation`] if the population is full.
    pub fn push(&mut self, genotype: Genotype<C>) -> Result<()> {
        if self.is_full() {
            return Err(self.full_error());
        }
        self.genotypes.push(self.adopt(genotype));
        self.sorted = false;
        Ok(())
    }

    /// Appends several genotypes.
    ///
    /// Either every genotype is added or, when they don't fit, none is.
    ///
    /// # Errors
    /// [`GaError::FullPopulation`] if they don't all fit.
    pub fn extend<I>(&mut self, genotypes: I) -> Result<()>
    where
        I: IntoIterator<Item = Genotype<C>>,
    {
        let incoming: Vec<Genotype<C>> = genotypes.into_iter().collect();
        if incoming.len() > self.remaining() {
            return Err(self.full_error());
        }
        for genotype in incoming {
            let genotype = self.adopt(genotype);
            self.genotypes.push(genotype);
        }
        self.sorted = false;
        Ok(())
    }

    /// Inserts a genotype at `index`, shifting later members right.
    ///
    /// An index past the end appends.
    ///
    /// # Errors
    /// [`GaError::FullPopulation`] if the population is full.
    pub fn insert(&mut self, index: usize, genotype: Genotype<C>) -> Result<()> {
        if self.is_full() {
            return Err(self.full_error());
        }
        let index = index.min(self.genotypes.len());
        let genotype = self.adopt(genotype);
        self.genotypes.insert(index, genotype);
        self.sorted = false;
        Ok(())
    }

    /// Replaces the genotype at `index`, returning the previous one.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize, genotype: Genotype<C>) -> Result<Genotype<C>> {
        self.check_index(index)?;
        let genotype = self.adopt(genotype);
        self.sorted = false;
        Ok(std::mem::replace(&mut self.genotypes[index], genotype))
    }

    /// Removes and returns the genotype at `index`.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<Genotype<C>> {
        self.check_index(index)?;
        Ok(self.genotypes.remove(index))
    }

    /// Removes and returns the last genotype.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] if the population is empty.
    pub fn pop(&mut self) -> Result<Genotype<C>> {
        self.genotypes
            .pop()
            .ok_or(GaError::IndexOutOfRange { index: 0, len: 0 })
    }

    /// Removes every genotype. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.genotypes.clear();
        self.sorted = false;
    }

    /// Keeps only the last `n` genotypes of the current order.
    ///
    /// After a [`sort`](Self::sort) these are the `n` fittest.
    pub fn retain_last(&mut self, n: usize) {
        let excess = self.genotypes.len().saturating_sub(n);
        self.genotypes.drain(..excess);
    }

    /// Stable ascending sort by fitness (best last).
    pub fn sort(&mut self) {
        let fitness = &self.fitness;
        self.genotypes
            .sort_by(|a, b| a.fitness_or(fitness).total_cmp(&b.fitness_or(fitness)));
        self.sorted = true;
    }

    /// Reverses the current order. Always clears the sorted flag.
    pub fn reverse(&mut self) {
        self.genotypes.reverse();
        self.sorted = false;
    }

    /// The genotype with the highest fitness, without reordering.
    ///
    /// Ties resolve to the last one in the current order.
    pub fn fittest(&self) -> Option<&Genotype<C>> {
        self.genotypes
            .iter()
            .max_by(|a, b| self.score(a).total_cmp(&self.score(b)))
    }

    /// Indices of the members in ascending fitness order.
    ///
    /// Equal fitness keeps the current relative order.
    pub fn ranking(&self) -> Vec<usize> {
        let scores: Vec<f64> = self.genotypes.iter().map(|g| self.score(g)).collect();
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        order
    }

    /// Fitness of a member, evaluated with the population's function.
    pub fn score(&self, genotype: &Genotype<C>) -> f64 {
        genotype.fitness_or(&self.fitness)
    }

    /// Genotype at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Genotype<C>> {
        self.genotypes.get(index)
    }

    /// Iterates over the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Genotype<C>> {
        self.genotypes.iter()
    }

    /// The members as a slice.
    pub fn as_slice(&self) -> &[Genotype<C>] {
        &self.genotypes
    }

    /// Whether a genotype with the same id is a member.
    pub fn contains_id(&self, genotype: &Genotype<C>) -> bool {
        self.genotypes.iter().any(|g| g.id() == genotype.id())
    }

    fn adopt(&self, mut genotype: Genotype<C>) -> Genotype<C> {
        genotype.set_fitness_function(self.fitness.clone());
        genotype
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.genotypes.len() {
            Ok(())
        } else {
            Err(GaError::IndexOutOfRange {
                index,
                len: self.genotypes.len(),
            })
        }
    }

    fn full_error(&self) -> GaError {
        GaError::FullPopulation {
            max_size: self.max_size,
        }
    }
}

impl<C: Clone> Population<C> {
    /// Concatenates two populations into a new one.
    ///
    /// The result's capacity is the sum of both capacities; `self`'s members
    /// come first. The fitness function is `self`'s.
    pub fn concat(&self, other: &Population<C>) -> Population<C> {
        let mut genotypes = Vec::with_capacity(self.len() + other.len());
        genotypes.extend(self.genotypes.iter().cloned());
        genotypes.extend(other.genotypes.iter().map(|g| self.adopt(g.clone())));
        Population {
            genotypes,
            max_size: self.max_size + other.max_size,
            fitness: self.fitness.clone(),
            sorted: false,
        }
    }
}

impl<C> Index<usize> for Population<C> {
    type Output = Genotype<C>;

    fn index(&self, index: usize) -> &Genotype<C> {
        &self.genotypes[index]
    }
}

impl<'a, C> IntoIterator for &'a Population<C> {
    type Item = &'a Genotype<C>;
    type IntoIter = std::slice::Iter<'a, Genotype<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.genotypes.iter()
    }
}

impl<C> IntoIterator for Population<C> {
    type Item = Genotype<C>;
    type IntoIter = std::vec::IntoIter<Genotype<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.genotypes.into_iter()
    }
}

impl<C> Add for Population<C> {
    type Output = Population<C>;

    fn add(mut self, other: Population<C>) -> Population<C> {
        self.max_size += other.max_size;
        let fitness = self.fitness.clone();
        self.genotypes.extend(other.genotypes.into_iter().map(|mut g| {
            g.set_fitness_function(fitness.clone());
            g
        }));
        self.sorted = false;
        self
    }
}

impl<C: Clone> Add for &Population<C> {
    type Output = Population<C>;

    fn add(self, other: &Population<C>) -> Population<C> {
        self.concat(other)
    }
}

impl<C: fmt::Debug> fmt::Debug for Population<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Population")
            .field("max_size", &self.max_size)
            .field("sorted", &self.sorted)
            .field("genotypes", &self.genotypes)
            .finish()
    }
}
