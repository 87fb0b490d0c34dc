//! Deterministic random number generation.
//!
//! Two sources. `GameRng` is a 32-bit linear-congruential generator used by
//! world generation: its sequence is part of the map format, so the same
//! seed must build the same world on every platform. `RngManager` derives a
//! named ChaCha8 stream per engine system from the master seed; all
//! gameplay randomness (combat rolls, capture chance, AI action rolls) goes
//! through these streams so a whole run replays from its seed.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LCG_MUL: u32 = 1_664_525;
const LCG_ADD: u32 = 1_013_904_223;

/// Seeded LCG producing floats in `[0, 1)`.
///
/// Arbitrary 64-bit seed input is normalized by truncation to 32 bits, so
/// negative or oversized seeds are accepted rather than rejected.
#[derive(Clone, Debug)]
pub struct GameRng {
    state: u32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed as u32 }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
        f64::from(self.state) / 4_294_967_296.0
    }

    /// Uniform index into a collection of `len` elements. `len` must be > 0.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len - 1)
    }

    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Per-system gameplay RNG streams derived from one master seed.
///
/// Stream seeds are a hash of the stream name mixed with the master seed,
/// so a stream's sequence does not depend on which system happens to run
/// first.
pub struct RngManager {
    master_seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master_seed: seed,
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let seed = derive_stream_seed(self.master_seed, name);
        let entry = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(seed));
        SystemRng { inner: entry }
    }
}

fn derive_stream_seed(master: u64, name: &str) -> u64 {
    // FNV-1a over the name, folded into the master seed.
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    master
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
        ^ hash
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for SystemRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn lcg_is_reproducible() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = GameRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn seed_normalizes_by_truncation() {
        // Seeds congruent mod 2^32 are the same generator.
        let mut a = GameRng::new(3);
        let mut b = GameRng::new(0x1_0000_0003);
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn known_first_draw() {
        // state after one step from seed 0 is the additive constant
        let mut rng = GameRng::new(0);
        let expected = f64::from(1_013_904_223u32) / 4_294_967_296.0;
        assert_eq!(rng.next_f64(), expected);
    }

    #[test]
    fn streams_are_deterministic_and_distinct() {
        let mut mgr1 = RngManager::new(42);
        let mut mgr2 = RngManager::new(42);

        let v1: f64 = mgr1.stream("movement").gen();
        let v2: f64 = mgr2.stream("movement").gen();
        assert_eq!(v1, v2);

        let other: f64 = mgr1.stream("recruit").gen();
        assert_ne!(v1, other);
    }

    #[test]
    fn stream_seed_independent_of_access_order() {
        let mut first = RngManager::new(9);
        let mut second = RngManager::new(9);

        let _: f64 = first.stream("income").gen();
        let a: f64 = first.stream("movement").gen();
        let b: f64 = second.stream("movement").gen();
        assert_eq!(a, b);
    }
}
