//! Deterministic random number generation.
//!
//! RULE: Nothing in the planning core may call any platform RNG.
//! All randomness flows through a PlanRng constructed from the
//! explicit seed the caller passes to distribute().
//!
//! Same seed + same inputs = bit-identical schedule. The "reroll"
//! user action is just a call with a fresh seed; falling back to
//! wall-clock seeds is the caller's business, never this crate's.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// The seeded generator driving one distribution call: shuffle order,
/// week-count draws, and fractional day splits all come from here.
pub struct PlanRng {
    inner: Pcg32,
}

impl PlanRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a usize in [0, n).
    pub fn next_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        (self.inner.next_u64() % n as u64) as usize
    }

    /// Roll a float in [lo, hi).
    pub fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Fisher–Yates shuffle, in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i + 1);
            items.swap(i, j);
        }
    }
}
