//! Deterministic random sequences.
//!
//! Every generation owns exactly one sequence. Stages receive it as
//! `&mut dyn RandomSource` so that tests can substitute a scripted one.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    /// Advance the sequence and return the next value in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// An integer in `0..n`, computed as `floor(next * n)`.
    fn below(&mut self, n: usize) -> usize {
        let index = (self.next_f64() * n as f64).floor() as usize;
        index.min(n.saturating_sub(1))
    }

    /// A value in `[low, high)`.
    fn between(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// True with probability `percent / 100`.
    fn percent_chance(&mut self, percent: f64) -> bool {
        self.next_f64() * 100.0 < percent
    }
}

/// PCG32-backed sequence used for all production rendering.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

impl RandomSource for DeterministicRng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.gen_f64()
    }
}

/// Seed used when a request does not carry one: wall-clock milliseconds.
///
/// Output generated with this seed is not reproducible unless the seed is
/// reported back to the caller.
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Used by tests to drive a stage down a specific branch.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self {
            values,
            position: 0,
        }
    }

    /// A sequence that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
