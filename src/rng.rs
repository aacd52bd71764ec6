//! Random sources for spawn decisions.
//!
//! Gameplay only ever needs uniform draws in `[0, 1)`, so the controller is
//! generic over [`RandomSource`] instead of a full `rand::Rng`. The browser
//! build seeds a [`SeededRandom`] from entropy; tests and replays either fix
//! the seed or script exact values with [`ScriptedRandom`].

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: SmallRng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays queued values in order, then falls back to a fixed value.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(fallback: f64) -> Self {
        Self { queue: VecDeque::new(), fallback: fallback.clamp(0.0, 0.999_999) }
    }

    pub fn push(&mut self, value: f64) -> &mut Self {
        self.queue.push_back(value.clamp(0.0, 0.999_999));
        self
    }

    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) -> &mut Self {
        for v in values {
            self.push(v);
        }
        self
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
