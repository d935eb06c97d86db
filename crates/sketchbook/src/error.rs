//! Error type for geometry generation.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
//! so each variant only has to describe itself once.

use thiserror::Error;

/// Errors raised at the boundary of the generators.
///
/// Every finite shape request of a drawable size succeeds, including zero
/// and negative sizes. Rejected inputs are those that would stop the
/// segment loops from terminating or ask for more output than one call
/// may produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    /// A coordinate, size or angle that is NaN or infinite.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name as the caller passed it.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A request whose output would exceed a fixed size limit.
    #[error("{name} = {value} exceeds the limit of {limit}")]
    TooLarge {
        name: &'static str,
        value: f64,
        limit: f64,
    },

    /// Hatch stroke width must be finite and strictly positive.
    #[error("invalid stroke width {0}: must be finite and greater than zero")]
    InvalidStrokeWidth(f64),

    /// Segment length must be finite and strictly positive.
    #[error("invalid segment length {0}: must be finite and greater than zero")]
    InvalidSegmentLength(f64),

    /// `restore()` called on a surface with no saved state.
    #[error("restore called without a matching save")]
    UnbalancedRestore,
}

/// Convenience alias for results using [`SketchError`].
pub type Result<T> = std::result::Result<T, SketchError>;

/// Reject NaN and infinite values.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SketchError::InvalidParameter { name, value })
    }
}

/// Reject values above `limit`.
pub(crate) fn ensure_at_most(name: &'static str, value: f64, limit: f64) -> Result<f64> {
    if value <= limit {
        Ok(value)
    } else {
        Err(SketchError::TooLarge { name, value, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("x", -3.5), Ok(-3.5));
        assert_eq!(ensure_finite("x", 0.0), Ok(0.0));
    }

    #[test]
    fn non_finite_values_are_named() {
        let err = ensure_finite("radius", f64::INFINITY).unwrap_err();
        assert_eq!(
            err,
            SketchError::InvalidParameter { name: "radius", value: f64::INFINITY }
        );
        assert_eq!(err.to_string(), "invalid parameter radius = inf");

        assert!(matches!(
            ensure_finite("dx", f64::NAN),
            Err(SketchError::InvalidParameter { name: "dx", .. })
        ));
    }

    #[test]
    fn oversize_values_report_the_limit() {
        assert_eq!(ensure_at_most("segments", 10.0, 10.0), Ok(10.0));
        let err = ensure_at_most("segments", 11.0, 10.0).unwrap_err();
        assert_eq!(err, SketchError::TooLarge { name: "segments", value: 11.0, limit: 10.0 });
        assert_eq!(err.to_string(), "segments = 11 exceeds the limit of 10");
    }
}
