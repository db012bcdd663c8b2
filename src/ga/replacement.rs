//! Replacement schemas.
//!
//! A replacement merges the current population and the offspring of a step
//! into the population of the next generation.

use super::population::Population;
use crate::error::Result;

/// Builds the next generation from the current population and offspring.
pub trait Replacement<C> {
    /// Produces a population of capacity `max_size`.
    ///
    /// Both inputs may be reordered (sorted) but keep their members.
    fn apply(
        &self,
        population: &mut Population<C>,
        offspring: &mut Population<C>,
        max_size: usize,
    ) -> Result<Population<C>>;

    /// Resolves the target size and delegates to [`apply`](Replacement::apply).
    ///
    /// `None` uses the capacity of `population`. `Some(0)` is not a valid
    /// size: it is logged and replaced by that capacity as well.
    fn replace(
        &self,
        population: &mut Population<C>,
        offspring: &mut Population<C>,
        max_size: Option<usize>,
    ) -> Result<Population<C>> {
        let max_size = match max_size {
            Some(0) => {
                tracing::warn!(
                    fallback = population.max_size(),
                    "replacement size too small; using the population capacity"
                );
                population.max_size()
            }
            Some(n) => n,
            None => population.max_size(),
        };
        self.apply(population, offspring, max_size)
    }
}

/// Keeps the fittest of the population and the offspring combined.
///
/// Strongly elitist: a child survives only if it beats the members it
/// would displace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighElitism;

impl<C: Clone> Replacement<C> for HighElitism {
    fn apply(
        &self,
        population: &mut Population<C>,
        offspring: &mut Population<C>,
        max_size: usize,
    ) -> Result<Population<C>> {
        let mut next = population.concat(offspring);
        next.sort();
        next.retain_last(max_size);
        next.set_max_size(max_size);
        Ok(next)
    }
}

/// Offspring first, then the fittest of the old population.
///
/// The fittest `min(max_size, offspring.len())` children always survive;
/// remaining slots go to the best of the previous generation. With as many
/// children as slots this is a generational replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowElitism;

impl<C: Clone> Replacement<C> for LowElitism {
    fn apply(
        &self,
        population: &mut Population<C>,
        offspring: &mut Population<C>,
        max_size: usize,
    ) -> Result<Population<C>> {
        let mut next = Population::new(max_size, population.fitness().clone());

        offspring.sort();
        let take = max_size.min(offspring.len());
        next.extend(offspring.iter().skip(offspring.len() - take).cloned())?;

        let take = next.remaining().min(population.len());
        if take > 0 {
            population.sort();
            next.extend(population.iter().skip(population.len() - take).cloned())?;
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::{fitness_fn, Genotype};

    /// Genes are `[id, position]`; fitness is the position, so ids grow with
    /// fitness inside a population and ties across populations keep order.
    fn build_population(size: usize, first_id: i64) -> Population<Vec<i64>> {
        let mut population = Population::new(size, fitness_fn(|c: &Vec<i64>| c[1] as f64));
        for i in 0..size as i64 {
            population.push(Genotype::new(vec![first_id + i, i])).unwrap();
        }
        population
    }

    fn sorted_ids(population: &Population<Vec<i64>>) -> Vec<i64> {
        let mut ids: Vec<i64> = population.iter().map(|g| g[0]).collect();
        ids.sort();
        ids
    }

    fn schemas() -> Vec<Box<dyn Replacement<Vec<i64>>>> {
        vec![Box::new(HighElitism), Box::new(LowElitism)]
    }

    #[test]
    fn test_missing_or_invalid_size_uses_population_capacity() {
        for schema in schemas() {
            for (pop_size, off_size) in [(10, 5), (5, 10)] {
                for max_size in [None, Some(0)] {
                    let mut population = build_population(pop_size, 0);
                    let mut offspring = build_population(off_size, 0);
                    let next = schema
                        .replace(&mut population, &mut offspring, max_size)
                        .unwrap();
                    assert_eq!(next.max_size(), pop_size);
                    assert_eq!(next.len(), pop_size);
                }
            }
        }
    }

    #[test]
    fn test_different_sizes_for_the_new_population() {
        let cases = [
            (10, 5, 2, 2),
            (5, 10, 2, 2),
            (10, 5, 5, 5),
            (5, 10, 5, 5),
            (10, 5, 9, 9),
            (5, 10, 9, 9),
            (10, 5, 10, 10),
            (5, 10, 10, 10),
            (10, 5, 11, 11),
            (5, 10, 11, 11),
            (10, 5, 15, 15),
            (5, 10, 15, 15),
            (10, 5, 20, 15),
            (5, 10, 20, 15),
        ];
        for schema in schemas() {
            for (pop_size, off_size, max_size, expected) in cases {
                let mut population = build_population(pop_size, 0);
                let mut offspring = build_population(off_size, 0);
                let next = schema
                    .replace(&mut population, &mut offspring, Some(max_size))
                    .unwrap();
                assert_eq!(next.max_size(), max_size);
                assert_eq!(next.len(), expected);
            }
        }
    }

    #[test]
    fn test_any_offspring_size_up_to_population_size() {
        for schema in schemas() {
            for size in [2, 4, 8, 16] {
                for off_size in 1..=size {
                    let mut population = build_population(size, 0);
                    let mut offspring = build_population(off_size, size as i64);
                    let next = schema.replace(&mut population, &mut offspring, None).unwrap();
                    assert_eq!(next.len(), size);
                    assert!(next.len() <= next.max_size());
                }
            }
        }
    }

    #[test]
    fn test_high_elitism() {
        for (pop_size, off_size, expected) in [
            (2, 1, vec![1, 2]),
            (2, 2, vec![1, 3]),
            (5, 3, vec![2, 3, 4, 6, 7]),
            (5, 5, vec![3, 4, 7, 8, 9]),
        ] {
            let mut population = build_population(pop_size, 0);
            let mut offspring = build_population(off_size, pop_size as i64);
            let next = HighElitism
                .replace(&mut population, &mut offspring, None)
                .unwrap();
            assert_eq!(sorted_ids(&next), expected);
        }
    }

    #[test]
    fn test_high_elitism_result_is_sorted() {
        let mut population = build_population(2, 0);
        let mut offspring = build_population(1, 2);
        let next = HighElitism
            .replace(&mut population, &mut offspring, None)
            .unwrap();
        assert!(next.is_sorted());
        assert_eq!(next.max_size(), 2);
        let fitness: Vec<f64> = next.iter().map(|g| g.fitness().unwrap()).collect();
        assert_eq!(fitness, vec![0.0, 1.0]);
    }

    #[test]
    fn test_low_elitism() {
        for (pop_size, off_size, expected) in [
            (2, 1, vec![1, 2]),
            (2, 2, vec![2, 3]),
            (5, 3, vec![3, 4, 5, 6, 7]),
            (5, 5, vec![5, 6, 7, 8, 9]),
        ] {
            let mut population = build_population(pop_size, 0);
            let mut offspring = build_population(off_size, pop_size as i64);
            let next = LowElitism
                .replace(&mut population, &mut offspring, None)
                .unwrap();
            assert_eq!(sorted_ids(&next), expected);
        }
    }

    #[test]
    fn test_low_elitism_prefers_offspring() {
        // Children are all worse than the old population, yet survive.
        let mut population = Population::new(3, fitness_fn(|c: &Vec<i64>| c[0] as f64));
        for g in [10, 11, 12] {
            population.push(Genotype::new(vec![g])).unwrap();
        }
        let mut offspring = Population::new(2, population.fitness().clone());
        for g in [0, 1] {
            offspring.push(Genotype::new(vec![g])).unwrap();
        }

        let next = LowElitism
            .replace(&mut population, &mut offspring, None)
            .unwrap();
        assert_eq!(sorted_ids(&next), vec![0, 1, 12]);
    }

    #[test]
    fn test_inputs_keep_their_members() {
        let mut population = build_population(4, 0);
        let mut offspring = build_population(4, 4);
        let before = sorted_ids(&population);
        HighElitism
            .replace(&mut population, &mut offspring, None)
            .unwrap();
        assert_eq!(sorted_ids(&population), before);
        assert_eq!(offspring.len(), 4);
    }
}
