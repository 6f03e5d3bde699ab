//! Random draw abstraction for resampling
//!
//! The bootstrap only ever needs "pick a row index uniformly". Keeping that
//! behind a trait lets tests script the exact draws and lets deployments
//! choose between a seeded generator and an entropy-seeded one.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform row indices
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is never zero
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot draw from an empty range");
        self.gen_range(0..len)
    }
}

/// Generator used when the caller does not inject one
///
/// Seeded when a seed is configured. Otherwise draws from OS entropy, which
/// makes bootstrap bands differ from run to run.
pub fn default_source(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => unseeded(),
    }
}

#[cfg(feature = "std")]
fn unseeded() -> SmallRng {
    SmallRng::from_entropy()
}

#[cfg(not(feature = "std"))]
fn unseeded() -> SmallRng {
    // No entropy source without std
    SmallRng::seed_from_u64(0x5EED_1A11)
}
