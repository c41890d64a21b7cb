//! Job duration sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Inclusive tick bounds for a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBounds {
    /// Shortest job, in ticks.
    pub min_ticks: u64,
    /// Longest job, in ticks.
    pub max_ticks: u64,
}

impl DurationBounds {
    /// Build bounds, rejecting `max_ticks < min_ticks`.
    ///
    /// # Errors
    ///
    /// Returns a message when the range is empty.
    pub fn new(min_ticks: u64, max_ticks: u64) -> Result<Self, String> {
        if max_ticks < min_ticks {
            return Err(format!(
                "max_duration ({max_ticks}) must be >= min_duration ({min_ticks})"
            ));
        }
        Ok(Self {
            min_ticks,
            max_ticks,
        })
    }

    /// Whether `ticks` falls inside the bounds.
    #[must_use]
    pub const fn contains(&self, ticks: u64) -> bool {
        self.min_ticks <= ticks && ticks <= self.max_ticks
    }
}

/// Draws job durations uniformly from `[min_ticks, max_ticks]`.
///
/// Each sampler owns its random source. The scheduler thread owns the only
/// sampler of a run, so no synchronization is involved.
#[derive(Debug)]
pub struct DurationSampler {
    bounds: DurationBounds,
    rng: StdRng,
}

impl DurationSampler {
    /// Sampler seeded from the thread-local generator.
    #[must_use]
    pub fn new(bounds: DurationBounds) -> Self {
        Self {
            bounds,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Sampler with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(bounds: DurationBounds, seed: u64) -> Self {
        Self {
            bounds,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one duration.
    pub fn sample(&mut self) -> u64 {
        self.rng
            .random_range(self.bounds.min_ticks..=self.bounds.max_ticks)
    }
}
