//! Deterministic simulation-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every stochastic component owns its own `SimRng` seeded from the run's
//! master seed XOR a per-component stream offset:
//!
//!   seed = global_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream numbers across the seed space.  The
//! wrapper is `Clone`: a cloned simulation continues the exact same random
//! sequence as the original, so look-ahead runs are replayable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed an independent stream from the master seed and a stream number.
    pub fn for_stream(global_seed: u64, stream: u64) -> Self {
        SimRng::new(global_seed ^ stream.wrapping_mul(MIXING_CONSTANT))
    }

    /// Expose the inner `SmallRng` for use with `rand` / `rand_distr`
    /// distribution types (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
