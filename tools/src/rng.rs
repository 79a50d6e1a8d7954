//! Deterministic random number generation for simulated sessions.
//!
//! RULE: the runner never calls a platform RNG. Every hazard stream is
//! seeded from (master_seed XOR slot index), so adding a stream never
//! changes the others.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct HazardRng {
    inner: Pcg64Mcg,
}

impl HazardRng {
    pub fn new(master_seed: u64, slot: HazardSlot) -> Self {
        let derived_seed = master_seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self { inner: Pcg64Mcg::seed_from_u64(derived_seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f32(&mut self) -> f32 {
        let bits = self.inner.next_u64();
        ((bits >> 40) as f32) * (1.0 / (1u64 << 24) as f32)
    }

    /// Roll a float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// Stable stream assignments. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum HazardSlot {
    Health  = 0,
    Battery = 1,
    Meteor  = 2,
    Seat    = 3,
}
