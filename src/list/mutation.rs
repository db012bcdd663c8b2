//! Mutation schemas for list genotypes.
//!
//! All schemas mutate gene by gene: each position is hit independently with
//! the mutation probability. The genotype is forked on the first hit, and
//! returned untouched (same id) when no gene was hit.

use super::alphabet::Alphabet;
use super::initializer::ordered_bounds;
use super::ListGenotype;
use crate::error::{GaError, Result};
use crate::ga::Mutation;
use crate::random::{take_chances, Probability};
use rand::{Rng, RngCore};

/// Applies `mutate` to every gene hit with `probability`.
fn per_gene<T, F>(
    probability: Probability,
    genotype: ListGenotype<T>,
    rng: &mut dyn RngCore,
    mut mutate: F,
) -> ListGenotype<T>
where
    T: Clone,
    F: FnMut(&mut Vec<T>, usize, &mut dyn RngCore),
{
    let mut mutated: Option<ListGenotype<T>> = None;
    for i in 0..genotype.len() {
        if probability.happens(rng) {
            let child = mutated.get_or_insert_with(|| genotype.fork());
            mutate(child.chromosome_mut(), i, rng);
        }
    }
    mutated.unwrap_or(genotype)
}

/// Replaces hit genes with symbols drawn from an alphabet.
///
/// By default the new symbol always differs from the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomGene<T> {
    alphabet: Alphabet<T>,
    same: bool,
}

impl<T> RandomGene<T> {
    pub fn new(alphabet: Alphabet<T>) -> Self {
        Self {
            alphabet,
            same: false,
        }
    }

    /// Lets a hit gene be replaced by its own value.
    pub fn allow_same(mut self) -> Self {
        self.same = true;
        self
    }

    pub fn alphabet(&self) -> &Alphabet<T> {
        &self.alphabet
    }
}

impl<T: Clone + PartialEq> Mutation<Vec<T>> for RandomGene<T> {
    fn mutate(
        &self,
        probability: Probability,
        genotype: ListGenotype<T>,
        rng: &mut dyn RngCore,
    ) -> ListGenotype<T> {
        per_gene(probability, genotype, rng, |genes, i, rng| {
            let mut gene = self.alphabet.get(rng);
            while !self.same && gene == genes[i] {
                gene = self.alphabet.get(rng);
            }
            genes[i] = gene;
        })
    }
}

/// Swaps each hit gene with another random position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapGenes;

impl<T: Clone> Mutation<Vec<T>> for SwapGenes {
    fn mutate(
        &self,
        probability: Probability,
        genotype: ListGenotype<T>,
        rng: &mut dyn RngCore,
    ) -> ListGenotype<T> {
        if genotype.len() < 2 {
            return genotype;
        }
        per_gene(probability, genotype, rng, |genes, i, rng| {
            let mut j = rng.random_range(0..genes.len() - 1);
            if j >= i {
                j += 1;
            }
            genes.swap(i, j);
        })
    }
}

/// Adds or subtracts a small amount to each hit gene.
///
/// With `fixed` the step is always `amount`; otherwise it is drawn
/// uniformly from `1..=amount`. The sign is a fair coin flip. Results are
/// clamped into the optional bounds.
///
/// ```
/// use u_genetic::ga::{Genotype, Mutation};
/// use u_genetic::list::Creep;
/// use u_genetic::random::{create_rng, Probability};
///
/// let creep = Creep::new(-2, true, Some(10), Some(0)).unwrap();
/// assert_eq!((creep.amount(), creep.lower(), creep.upper()), (2, Some(0), Some(10)));
///
/// let mutated = creep.mutate(Probability::ONE, Genotype::new(vec![5]), &mut create_rng(1));
/// assert!(mutated[0] == 3 || mutated[0] == 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creep {
    amount: i64,
    fixed: bool,
    lower: Option<i64>,
    upper: Option<i64>,
}

impl Creep {
    /// `amount` is stored as its absolute value. Swapped bounds are
    /// reordered.
    ///
    /// # Errors
    /// - [`GaError::InvalidConfig`] when `amount` is zero
    /// - [`GaError::BoundsCannotBeTheSame`] when both bounds are set and equal
    pub fn new(amount: i64, fixed: bool, lower: Option<i64>, upper: Option<i64>) -> Result<Self> {
        if amount == 0 {
            return Err(GaError::InvalidConfig(
                "creep amount cannot be zero".into(),
            ));
        }
        let (lower, upper) = match (lower, upper) {
            (Some(l), Some(u)) => {
                let (l, u) = ordered_bounds(l, u)?;
                (Some(l), Some(u))
            }
            bounds => bounds,
        };
        Ok(Self {
            amount: amount.saturating_abs(),
            fixed,
            lower,
            upper,
        })
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn lower(&self) -> Option<i64> {
        self.lower
    }

    pub fn upper(&self) -> Option<i64> {
        self.upper
    }

    fn step(&self, rng: &mut dyn RngCore) -> i64 {
        let amount = if self.fixed {
            self.amount
        } else {
            rng.random_range(1..=self.amount)
        };
        if take_chances(0.5, rng) {
            amount
        } else {
            -amount
        }
    }

    fn bound(&self, gene: i64) -> i64 {
        let gene = self.lower.map_or(gene, |l| gene.max(l));
        self.upper.map_or(gene, |u| gene.min(u))
    }
}

impl Mutation<Vec<i64>> for Creep {
    fn mutate(
        &self,
        probability: Probability,
        genotype: ListGenotype<i64>,
        rng: &mut dyn RngCore,
    ) -> ListGenotype<i64> {
        per_gene(probability, genotype, rng, |genes, i, rng| {
            let step = self.step(rng);
            genes[i] = self.bound(genes[i].saturating_add(step));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Genotype;
    use crate::random::create_rng;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // ---- Per-gene contract ----

    #[test]
    fn test_zero_probability_returns_same_genotype() {
        let mut rng = create_rng(42);
        let genotype = Genotype::new(chars("ACGTACGT"));
        let id = genotype.id();

        let random_gene = RandomGene::new(Alphabet::genetic_code());
        let mutated = random_gene.mutate(Probability::ZERO, genotype, &mut rng);
        assert_eq!(mutated.id(), id);

        let mutated = SwapGenes.mutate(Probability::ZERO, mutated, &mut rng);
        assert_eq!(mutated.id(), id);
        assert_eq!(mutated.chromosome(), &chars("ACGTACGT"));
    }

    #[test]
    fn test_mutation_forks_the_genotype() {
        let mut rng = create_rng(42);
        let original = Genotype::new(chars("AAAAAAAAAA"));
        let copy = original.clone();

        let random_gene = RandomGene::new(Alphabet::genetic_code());
        let mutated = random_gene.mutate(Probability::ONE, copy, &mut rng);
        assert_ne!(mutated.id(), original.id());
        assert_eq!(original.chromosome(), &chars("AAAAAAAAAA"));
    }

    // ---- RandomGene ----

    #[test]
    fn test_random_gene_always_changes_genes() {
        let mut rng = create_rng(42);
        let mutation = RandomGene::new(Alphabet::genetic_code());
        for _ in 0..20 {
            let genotype = Genotype::new(chars("AAAAAAAAAA"));
            let mutated = mutation.mutate(Probability::ONE, genotype, &mut rng);
            assert!(mutated.iter().all(|&g| g != 'A'));
            assert!(mutated.iter().all(|g| mutation.alphabet().contains(g)));
        }
    }

    #[test]
    fn test_random_gene_may_keep_value() {
        let mut rng = create_rng(42);
        let mutation = RandomGene::new(Alphabet::binary()).allow_same();
        let mutated = mutation.mutate(Probability::ONE, Genotype::new(vec![0u8; 64]), &mut rng);
        let zeros = mutated.iter().filter(|&&g| g == 0).count();
        assert!(zeros > 0 && zeros < 64);
    }

    #[test]
    fn test_random_gene_binary_flips() {
        let mutation = RandomGene::new(Alphabet::binary());
        let genotype = Genotype::new(vec![0u8, 1, 1, 0]);
        let mutated = mutation.mutate(Probability::ONE, genotype, &mut create_rng(0));
        assert_eq!(mutated.chromosome(), &vec![1, 0, 0, 1]);
    }

    // ---- SwapGenes ----

    #[test]
    fn test_swap_genes_preserves_genes() {
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let genotype = Genotype::new((0..10).collect::<Vec<u32>>());
            let mutated = SwapGenes.mutate(Probability::new(0.5), genotype, &mut rng);
            let mut genes = mutated.into_chromosome();
            genes.sort_unstable();
            assert_eq!(genes, (0..10).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn test_swap_genes_two_positions() {
        let genotype = Genotype::new(vec!['A', 'C']);
        let mutated = SwapGenes.mutate(Probability::ONE, genotype, &mut create_rng(3));
        // Both positions are hit: swapped twice.
        assert_eq!(mutated.chromosome(), &vec!['A', 'C']);
    }

    #[test]
    fn test_swap_genes_short_genotypes() {
        let mut rng = create_rng(42);
        for genes in [vec![], vec![7]] {
            let genotype = Genotype::new(genes.clone());
            let id = genotype.id();
            let mutated = SwapGenes.mutate(Probability::ONE, genotype, &mut rng);
            assert_eq!(mutated.id(), id);
            assert_eq!(mutated.chromosome(), &genes);
        }
    }

    // ---- Creep ----

    #[test]
    fn test_creep_amount_cannot_be_zero() {
        assert!(matches!(
            Creep::new(0, true, None, None),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_creep_bounds_cannot_be_the_same() {
        for (lower, upper) in [(0, 0), (1, 1)] {
            assert_eq!(
                Creep::new(1, true, Some(lower), Some(upper)),
                Err(GaError::BoundsCannotBeTheSame)
            );
        }
    }

    #[test]
    fn test_creep_boundaries() {
        let cases = [
            (None, None, None, None),
            (None, Some(10), None, Some(10)),
            (Some(-10), None, Some(-10), None),
            (Some(-10), Some(10), Some(-10), Some(10)),
            (Some(10), Some(-10), Some(-10), Some(10)),
            (Some(-10), Some(-5), Some(-10), Some(-5)),
            (Some(-5), Some(-10), Some(-10), Some(-5)),
            (Some(5), Some(10), Some(5), Some(10)),
            (Some(10), Some(5), Some(5), Some(10)),
        ];
        for (lower, upper, exp_lower, exp_upper) in cases {
            let creep = Creep::new(1, true, lower, upper).unwrap();
            assert_eq!((creep.lower(), creep.upper()), (exp_lower, exp_upper));
        }
    }

    #[test]
    fn test_creep_amount_stored_as_positive() {
        assert_eq!(Creep::new(1, true, None, None).unwrap().amount(), 1);
        assert_eq!(Creep::new(-1, true, None, None).unwrap().amount(), 1);
        assert!(Creep::new(3, false, None, None).map(|c| !c.is_fixed()).unwrap());
    }

    #[test]
    fn test_creep_fixed_step() {
        let mut rng = create_rng(42);
        for amount in [1, 2, 10] {
            let creep = Creep::new(amount, true, None, None).unwrap();
            for _ in 0..20 {
                let mutated = creep.mutate(Probability::ONE, Genotype::new(vec![5]), &mut rng);
                assert!(mutated[0] == 5 + amount || mutated[0] == 5 - amount);
            }
        }
    }

    #[test]
    fn test_creep_variable_step() {
        let mut rng = create_rng(42);
        let creep = Creep::new(10, false, None, None).unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let mutated = creep.mutate(Probability::ONE, Genotype::new(vec![5]), &mut rng);
            let delta = mutated[0] - 5;
            assert!(delta != 0 && delta.abs() <= 10);
            seen.insert(delta);
        }
        assert!(seen.len() > 2);
    }

    #[test]
    fn test_creep_clamps_into_bounds() {
        let mut rng = create_rng(42);
        let cases = [
            (Some(0), Some(10), 0, 10),
            (None, Some(10), -5, 10),
            (Some(0), None, 0, 15),
        ];
        for (lower, upper, min, max) in cases {
            let creep = Creep::new(10, true, lower, upper).unwrap();
            for _ in 0..20 {
                let mutated = creep.mutate(Probability::ONE, Genotype::new(vec![5]), &mut rng);
                assert!(mutated[0] == min || mutated[0] == max, "got {}", mutated[0]);
            }
        }
    }
}
