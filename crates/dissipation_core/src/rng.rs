//! Seeded random streams.
//!
//! Every consumer owns its own [`SimRng`]; there is no shared or thread-local
//! generator anywhere in the engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A restartable stream of uniform `f64` values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl SimRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Stream for `seed + salt`, wrapping on overflow.
    #[must_use]
    pub fn salted(seed: u64, salt: u64) -> Self {
        Self::new(seed.wrapping_add(salt))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Rewinds to the first value of the stream.
    pub fn restart(&mut self) {
        self.inner = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
