//! Seedable random source used throughout the simulation.
//!
//! A [`RandomEngine`] is not shared between threads. Parallel callers derive
//! one engine per work item with [`RandomEngine::for_stream`], so a batch gives
//! identical results regardless of scheduling.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp1, Normal, Poisson};
use thiserror::Error;

/// Default cap on acceptance/rejection attempts before giving up.
pub const DEFAULT_MAX_REJECTION_ATTEMPTS: u64 = 1_000_000;

/// Errors raised by random sampling.
#[derive(Debug, Error)]
pub enum RandomError {
    /// Acceptance/rejection sampling did not accept within the attempt limit.
    #[error("Rejection sampling did not accept a sample after {attempts} attempts")]
    RejectionLimit {
        /// Number of attempts made.
        attempts: u64,
    },

    /// A distribution parameter was invalid (negative width, NaN, ...).
    #[error("Invalid distribution parameter: {0}")]
    InvalidParameter(String),
}

/// A seedable pseudo-random engine.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: ChaCha8Rng,
    max_rejection_attempts: u64,
}

impl RandomEngine {
    /// Create an engine from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_rejection_attempts: DEFAULT_MAX_REJECTION_ATTEMPTS,
        }
    }

    /// Create the engine for work item `index` of a batch seeded with `seed`.
    ///
    /// Each index selects its own ChaCha stream under the batch key, so
    /// neighbouring seeds never share a work item's sequence.
    pub fn for_stream(seed: u64, index: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index);
        Self {
            rng,
            max_rejection_attempts: DEFAULT_MAX_REJECTION_ATTEMPTS,
        }
    }

    /// Override the attempt cap used by [`sample_from_function`](Self::sample_from_function).
    pub fn with_max_rejection_attempts(mut self, attempts: u64) -> Self {
        self.max_rejection_attempts = attempts.max(1);
        self
    }

    /// Uniform real on `[min, max)`.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.rng.gen::<f64>()
    }

    /// Uniform integer on `[min, max]` (inclusive). Returns `min` if `max <= min`.
    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform index on `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    /// Gaussian with the given mean and standard deviation.
    pub fn gaussian(&mut self, mean: f64, stdev: f64) -> Result<f64, RandomError> {
        if !(stdev >= 0.0) {
            return Err(RandomError::InvalidParameter(format!(
                "normal({mean}, {stdev}): negative standard deviation"
            )));
        }
        let dist = Normal::new(mean, stdev)
            .map_err(|e| RandomError::InvalidParameter(format!("normal({mean}, {stdev}): {e}")))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// Poisson-distributed count with the given mean.
    pub fn poisson(&mut self, mean: f64) -> Result<u64, RandomError> {
        let dist = Poisson::new(mean)
            .map_err(|e| RandomError::InvalidParameter(format!("poisson({mean}): {e}")))?;
        let count: f64 = dist.sample(&mut self.rng);
        Ok(count as u64)
    }

    /// Exponentially distributed distance with the given mean.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let unit: f64 = self.rng.sample(Exp1);
        mean * unit
    }

    /// Draw `x` from the density proportional to `f` by acceptance/rejection.
    ///
    /// `f` must be defined on `[xmin, xmax]` with range `[fmin, fmax]`. A
    /// candidate `u` is accepted when a uniform ordinate on `[fmin, fmax]`
    /// lies at or below `f(u)`.
    pub fn sample_from_function<F>(
        &mut self,
        f: F,
        xmin: f64,
        xmax: f64,
        fmin: f64,
        fmax: f64,
    ) -> Result<f64, RandomError>
    where
        F: Fn(f64) -> f64,
    {
        if !(xmin.is_finite() && xmax.is_finite() && fmin.is_finite() && fmax.is_finite())
            || xmax < xmin
            || fmax < fmin
        {
            return Err(RandomError::InvalidParameter(format!(
                "sampling domain [{xmin}, {xmax}] x [{fmin}, {fmax}]"
            )));
        }

        for _ in 0..self.max_rejection_attempts {
            let u = self.uniform(xmin, xmax);
            let w = self.uniform(fmin, fmax);
            if w <= f(u) {
                return Ok(u);
            }
        }

        Err(RandomError::RejectionLimit {
            attempts: self.max_rejection_attempts,
        })
    }
}
