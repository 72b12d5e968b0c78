//! Deterministic random picks for randomized runs.
//!
//! When a run is randomized the wizard may answer its own questions
//! (see [`RunCreator::submit_random`](crate::creation::RunCreator::submit_random)).
//! Picks must be reproducible so a run can be recreated from its name and
//! seed, so this wraps ChaCha8 seeded from a `u64`.
//!
//! ```
//! use locke_engine::core::SeededRng;
//!
//! let options = ["Bulbasaur", "Charmander", "Squirtle"];
//! let mut a = SeededRng::new(7).for_context("starter");
//! let mut b = SeededRng::new(7).for_context("starter");
//! assert_eq!(a.choose(&options), b.choose(&options));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seeded RNG with independent per-context streams.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
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
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    ///
    /// Returns `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.inner.gen_range(0..slice.len());
            Some(&slice[idx])
        }
    }
}
