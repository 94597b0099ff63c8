//! Random number generator abstraction for determinism.
//!
//! Setup steps that shuffle (the Esultare seating) draw from this trait, so
//! tests can inject a fixed sequence and production can use a real RNG.

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Shuffles `items` in place (Fisher-Yates) using `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for upper in (1..items.len()).rev() {
        let bound = u32::try_from(upper).unwrap_or(u32::MAX);
        let pick = rng.next_u32_range(0, bound) as usize;
        items.swap(upper, pick.min(upper));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Zero;

    impl DeterministicRng for Zero {
        fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
            min
        }

        fn next_f64(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_shuffle_with_minimum_draws_rotates_left() {
        let mut items = vec!['a', 'b', 'c', 'd'];

        shuffle(&mut items, &mut Zero);

        // swap(3,0) -> d b c a, swap(2,0) -> c b d a, swap(1,0) -> b c d a
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn test_shuffle_of_empty_and_single_slices_is_a_no_op() {
        let mut empty: Vec<u8> = Vec::new();
        let mut single = vec![1];

        shuffle(&mut empty, &mut Zero);
        shuffle(&mut single, &mut Zero);

        assert!(empty.is_empty());
        assert_eq!(single, vec![1]);
    }
}
