//! Seedable random source injected into the event controllers
//!
//! Type/room selection, trigger delays, camera rolls and flavor-text picks
//! all go through `RandomSource` so a seeded run replays the same event
//! sequence.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::EventId;

const UNIT_SCALE: f64 = (1u64 << 53) as f64;

/// Source of uniform randomness
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform in [0, 1)
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / UNIT_SCALE
    }

    /// Uniform in [min, max)
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.unit() * (max - min)
    }

    /// Uniform index in [0, len); `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    fn event_id(&mut self) -> EventId {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        EventId::from_random_bytes(bytes)
    }
}

/// Uniform pick with no dedup or no-repeat guarantee
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

/// ChaCha8-backed random source (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seed_from_u64(seed),
            None => Self::from_entropy(),
        }
    }

    /// Derive an independent stream for a sub-system
    pub fn fork(&mut self) -> Self {
        Self::seed_from_u64(self.rng.next_u64())
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Replays a fixed cycle of unit values
///
/// Handy for pinning a specific roll (camera detection, type pick) in
/// scenario tests and replays.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self { values, cursor: 0 }
    }

    /// Always returns the same unit value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.cursor % self.values.len()].clamp(0.0, 1.0 - f64::EPSILON);
        self.cursor += 1;
        ((value * UNIT_SCALE) as u64) << 11
    }
}
