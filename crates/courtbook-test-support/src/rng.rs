//! Deterministic `DeterministicRng` implementations for tests.

use courtbook_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. A shuffle driven by it rotates the slice one place left.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays a fixed sequence, clamped into the requested range.
/// Used where a test needs a specific seating order.
///
/// Panics once the sequence is exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` replaying `values`.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let value = self.values[self.index];
        self.index += 1;
        value.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
