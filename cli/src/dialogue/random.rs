//! # Random Source
//!
//! File: cli/src/dialogue/random.rs
//! Author: Christi Mahu
//!
//! Randomness is injected into the dialogue engine as a capability so that tests
//! can pin exact template choices. Two implementations ship with the crate:
//! `SeededRandom` for real conversations and `FixedRandom` for deterministic runs.
//!
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random values used by the response synthesizer and the
/// personalization roll.
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Picks one candidate uniformly at random.
///
/// Response pools are validated to be non-empty when the synthesizer is built;
/// an empty slice yields an empty string rather than a panic.
pub fn choose_uniformly<'a>(source: &mut dyn RandomSource, candidates: &'a [String]) -> &'a str {
    if candidates.is_empty() {
        return "";
    }
    &candidates[choose_index(source, candidates.len())]
}

/// Uniform index into a pool of `len` entries, clamped to the pool bounds.
pub fn choose_index(source: &mut dyn RandomSource, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    source.index(len).min(len - 1)
}

/// `StdRng`-backed source, reproducible when built from a seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic source: always answers with the same index (modulo `len`) and
/// the same unit value.
///
/// A `unit` of `0.0` makes every probability roll succeed; `1.0` makes every
/// roll fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandom {
    pub index: usize,
    pub unit: f64,
}

impl FixedRandom {
    pub fn new(index: usize, unit: f64) -> Self {
        Self { index, unit }
    }
}

impl RandomSource for FixedRandom {
    fn index(&mut self, len: usize) -> usize {
        self.index % len
    }

    fn unit(&mut self) -> f64 {
        self.unit
    }
}
