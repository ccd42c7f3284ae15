use dgemm_core::ValueSource;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Result, SourceError};

/// Default lower bound of generated values.
pub const DEFAULT_LOW: f64 = 0.0;
/// Default (exclusive) upper bound of generated values.
pub const DEFAULT_HIGH: f64 = 10.0;

/// Independent uniform draws over `[low, high)`.
///
/// Seeded sources are reproducible across runs; use them in tests.
pub struct UniformSource {
    rng: StdRng,
    dist: Uniform<f64>,
}

impl UniformSource {
    /// Uniform over `[0, 10)` with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed), DEFAULT_LOW, DEFAULT_HIGH)
    }

    /// Uniform over `[0, 10)` seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::build(StdRng::from_entropy(), DEFAULT_LOW, DEFAULT_HIGH)
    }

    /// Uniform over `[low, high)` with a fixed seed.
    ///
    /// # Errors
    /// Returns `InvalidRange` unless both bounds are finite and `low < high`.
    pub fn with_range(seed: u64, low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(SourceError::InvalidRange { low, high });
        }
        Ok(Self::build(StdRng::seed_from_u64(seed), low, high))
    }

    fn build(rng: StdRng, low: f64, high: f64) -> Self {
        Self {
            rng,
            dist: Uniform::new(low, high),
        }
    }
}

impl ValueSource for UniformSource {
    fn name(&self) -> &str {
        "uniform"
    }

    fn next_value(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}
