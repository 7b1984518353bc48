//! Seeded random stream owned by a single generation run

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random source for reproducible stochastic choices
///
/// Every random decision a generator makes is drawn from its own stream, so
/// two runs with the same seed and configuration paint identical canvases.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    /// Create a deterministic stream from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[low, high]`
    ///
    /// Returns `low` when the range is empty.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform byte in `[low, high]`
    ///
    /// Returns `low` when the range is empty.
    pub fn byte_inclusive(&mut self, low: u8, high: u8) -> u8 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform signed offset in `[-spread, spread]`
    pub fn offset(&mut self, spread: u8) -> i32 {
        if spread == 0 {
            return 0;
        }
        let spread = i32::from(spread);
        self.rng.random_range(-spread..=spread)
    }
}
