//! Deterministic random number generation for table layout.
//!
//! Pieces rest at slightly jittered home positions so the table does not
//! look machine-placed. The jitter is seeded: the same seed always yields
//! the same layout on every platform and toolchain.
//!
//! ```
//! use quatter::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_symmetric(0.05), b.gen_symmetric(0.05));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// `FxHasher` is a fixed function, so the stream does not change between
    /// Rust releases.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform value in `[-magnitude, magnitude]`.
    ///
    /// Returns 0.0 for a non-positive magnitude.
    pub fn gen_symmetric(&mut self, magnitude: f32) -> f32 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        self.inner.gen_range(-magnitude..=magnitude)
    }
}
