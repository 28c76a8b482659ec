//! Random sources for bounce perturbation and color picks
//!
//! The simulation only ever asks for uniform draws in [0, 1), so tests can
//! script exact sequences and assert exact velocities and colors.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in [0, 1)
pub trait RandomSource: std::fmt::Debug {
    fn next_unit(&mut self) -> f32;
}

/// Seeded PCG32 stream (reproducible per seed)
#[derive(Debug, Clone)]
pub struct PcgSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, wrapping at the end
///
/// An empty list always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}
