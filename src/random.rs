//! Random source helpers and probability handling.
//!
//! All stochastic decisions in the crate draw from an explicit generator
//! passed as `&mut dyn RngCore`, so a run is reproducible from its seed.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns `true` with the given probability.
///
/// Draws a uniform value in `[0, 1)` and compares it against
/// `probability`, so `0.0` never succeeds and `1.0` always does.
pub fn take_chances(probability: f64, rng: &mut dyn RngCore) -> bool {
    rng.random::<f64>() < probability
}

/// A probability clamped into `[0, 1]`.
///
/// Out-of-range values are truncated to the nearest bound, and missing or
/// non-numeric inputs become `0`.
///
/// ```
/// use u_genetic::random::Probability;
///
/// assert_eq!(Probability::new(-1.0).value(), 0.0);
/// assert_eq!(Probability::new(2.0).value(), 1.0);
/// assert_eq!(Probability::from(None::<f64>).value(), 0.0);
/// assert_eq!(Probability::from("0.5").value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probability(f64);

impl Probability {
    /// Never happens.
    pub const ZERO: Probability = Probability(0.0);
    /// Always happens.
    pub const ONE: Probability = Probability(1.0);

    /// Clamps `p` into `[0, 1]`. NaN is treated as `0`.
    pub fn new(p: f64) -> Self {
        if p.is_nan() {
            return Self::ZERO;
        }
        Probability(p.clamp(0.0, 1.0))
    }

    /// The clamped value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Rolls the dice against this probability.
    pub fn happens(self, rng: &mut dyn RngCore) -> bool {
        take_chances(self.0, rng)
    }
}

impl From<f64> for Probability {
    fn from(p: f64) -> Self {
        Probability::new(p)
    }
}

impl From<Option<f64>> for Probability {
    fn from(p: Option<f64>) -> Self {
        p.map(Probability::new).unwrap_or_default()
    }
}

impl From<&str> for Probability {
    fn from(s: &str) -> Self {
        match s.trim().parse::<f64>() {
            Ok(p) => Probability::new(p),
            Err(_) => {
                tracing::warn!(value = s, "probability is not numeric; using 0");
                Probability::ZERO
            }
        }
    }
}

impl FromStr for Probability {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Probability::new)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
