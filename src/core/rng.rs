//! Injected randomness capability.
//!
//! The engine never reaches for ambient entropy. Every random decision
//! (shuffles, random discards, random deactivations) flows through a
//! [`RandomSource`] owned by the match aggregate, so a host can inject:
//!
//! - [`GameRng::seeded`] for reproducible matches and tests
//! - [`GameRng::from_entropy`] for normal play
//! - any hand-rolled double (e.g. one that always picks index 0)
//!
//! ## Determinism
//!
//! ```
//! use statecraft::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::seeded(42);
//! let mut b = GameRng::seeded(42);
//!
//! for _ in 0..100 {
//!     assert_eq!(a.uniform_int(1000), b.uniform_int(1000));
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capability interface for uniform random draws.
///
/// Object-safe so the aggregate can hold `Box<dyn RandomSource>`.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn uniform_int(&mut self, bound: usize) -> usize;

    /// Uniformly chosen index into a sequence of `len` elements,
    /// or `None` when the sequence is empty.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.uniform_int(len))
        }
    }
}

/// Uniformly pick one element of a slice, or `None` if it is empty.
pub fn pick_one<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    rng.pick_index(items.len()).map(|i| &items[i])
}

/// Fisher-Yates shuffle driven by the capability surface only, so any
/// `RandomSource` (including test doubles) shuffles identically given
/// identical draws.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.uniform_int(i + 1);
        items.swap(i, j);
    }
}

/// ChaCha8-backed random source.
///
/// Deterministic for a given seed; the seed is retained for diagnostics.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a reproducible source from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a non-deterministic source for normal play.
    ///
    /// The sampled seed is retained, so a surprising match can still be
    /// replayed afterwards.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// The seed this source was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn uniform_float(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.inner.gen_range(0..bound)
        }
    }
}
