//! Deterministic noise for hand-drawn jitter.
//!
//! Only the *starting* offset of each stroke is random. After that the offset
//! advances by one per segment and drives a fixed composed-sine function, so
//! the wobble is organic but fully reproducible from a single seed.
//!
//! # Example
//! ```
//! use sketchbook::noise::{NoiseSource, angular_error, LINE_ERROR_DIVISOR};
//!
//! let mut noise = NoiseSource::new(42);
//! let offset = noise.start_offset(); // in [0, 256)
//! let error = angular_error(offset, LINE_ERROR_DIVISOR); // radians
//! assert!(error.abs() <= 1.0 / LINE_ERROR_DIVISOR);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Divisor for straight-line jitter.
pub const LINE_ERROR_DIVISOR: f64 = 18.0;

/// Divisor for arc jitter, before the taper multiplier.
pub const ARC_ERROR_DIVISOR: f64 = 8.0;

/// Range the starting offset is drawn from.
pub const OFFSET_RANGE: f64 = 256.0;

/// Angular perturbation in radians for a given noise offset.
///
/// `sin(offset/5 * cos(offset/4 + 2)) / divisor`, so the magnitude never
/// exceeds `1 / divisor`.
#[inline]
pub fn angular_error(offset: f64, divisor: f64) -> f64 {
    (offset / 5.0 * (offset / 4.0 + 2.0).cos()).sin() / divisor
}

/// Seeded random source for one generation call.
///
/// Built fresh from the caller's seed on every call; never shared between
/// calls.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    /// The same seed always produces the same sequence.
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Starting noise offset for one stroke, in `[0, 256)`.
    #[inline]
    pub fn start_offset(&mut self) -> f64 {
        self.next_unit() * OFFSET_RANGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut noise1 = NoiseSource::new(42);
        let mut noise2 = NoiseSource::new(42);

        for _ in 0..100 {
            assert_eq!(noise1.next_unit(), noise2.next_unit());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut noise1 = NoiseSource::new(1);
        let mut noise2 = NoiseSource::new(2);

        let vals1: Vec<_> = (0..10).map(|_| noise1.next_unit()).collect();
        let vals2: Vec<_> = (0..10).map(|_| noise2.next_unit()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn offset_in_range() {
        let mut noise = NoiseSource::new(12345);
        for _ in 0..1000 {
            let offset = noise.start_offset();
            assert!((0.0..OFFSET_RANGE).contains(&offset));
        }
    }

    #[test]
    fn error_is_bounded_by_divisor() {
        for i in 0..2000 {
            let offset = i as f64 * 0.37;
            assert!(angular_error(offset, LINE_ERROR_DIVISOR).abs() <= 1.0 / 18.0 + 1e-12);
            assert!(angular_error(offset, ARC_ERROR_DIVISOR).abs() <= 1.0 / 8.0 + 1e-12);
        }
    }

    #[test]
    fn error_at_zero_offset_is_zero() {
        assert_eq!(angular_error(0.0, LINE_ERROR_DIVISOR), 0.0);
    }

    #[test]
    fn error_varies_with_offset() {
        let a = angular_error(10.0, LINE_ERROR_DIVISOR);
        let b = angular_error(11.0, LINE_ERROR_DIVISOR);
        assert_ne!(a, b);
    }
}
