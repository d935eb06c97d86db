//! Jittered segmenters for straight lines and circular arcs.
//!
//! Both segmenters walk towards their target in fixed-length steps, nudging
//! each step's heading by the noise function, and then snap the last segment
//! onto the exact target. The snap bounds the total drift, so a shape built
//! from several chained calls always meets up where it should.

use std::f64::consts::PI;

use tracing::trace;

use crate::error::{Result, SketchError, ensure_at_most, ensure_finite};
use crate::geometry::Point;
use crate::noise::{ARC_ERROR_DIVISOR, LINE_ERROR_DIVISOR, NoiseSource, angular_error};
use crate::path::Path;

/// Nominal stroke length of one jittered segment, in drawing units.
pub const SEGMENT_LENGTH: f64 = 8.0;

/// Distance over which arc jitter fades out before the end snap.
pub const TAPER_DISTANCE: f64 = 16.0;

/// Most jittered segments a single line or arc call may emit.
pub const MAX_SEGMENTS: usize = 1_000_000;

/// A circular arc request.
///
/// Angles are in degrees, clockwise from straight up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self { center, radius, start_angle, end_angle }
    }

    /// Exact start point on the circle.
    pub fn start_point(&self) -> Point {
        Point::on_circle(self.center, self.radius, self.start_angle)
    }

    /// Exact end point on the circle.
    pub fn end_point(&self) -> Point {
        Point::on_circle(self.center, self.radius, self.end_angle)
    }

    /// Length of the arc along the circle.
    pub fn length(&self) -> f64 {
        self.circumference() * ((self.end_angle - self.start_angle).abs() / 360.0)
    }

    fn circumference(&self) -> f64 {
        self.radius * 2.0 * PI
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_finite("center_x", self.center.x)?;
        ensure_finite("center_y", self.center.y)?;
        ensure_finite("radius", self.radius)?;
        ensure_finite("start_angle", self.start_angle)?;
        ensure_finite("end_angle", self.end_angle)?;
        ensure_finite("arc_length", self.length())?;
        Ok(())
    }
}

/// Arc jitter multiplier for the distance still to travel.
///
/// Equals 1 while more than `length + 16` units remain and falls linearly
/// towards zero as the arc approaches its end snap.
#[inline]
pub fn taper(remaining: f64, segment_length: f64) -> f64 {
    ((remaining - segment_length) / TAPER_DISTANCE).min(1.0)
}

/// Splits ideal lines and arcs into jittered fixed-length segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    length: f64,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self { length: SEGMENT_LENGTH }
    }
}

impl Segmenter {
    /// Segmenter with a custom segment length.
    pub fn new(length: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SketchError::InvalidSegmentLength(length));
        }
        Ok(Self { length })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Squared segment length; the straight loop runs while the remainder exceeds it.
    #[inline]
    pub fn distance_squared(&self) -> f64 {
        self.length * self.length
    }

    /// Squared displacement at or below which a line is drawn without jitter.
    #[inline]
    pub fn error_threshold(&self) -> f64 {
        self.length * self.length * 1.5
    }

    /// Remaining arc length at which the arc stops stepping and snaps.
    #[inline]
    pub fn circle_straight_gap(&self) -> f64 {
        self.length * 1.5
    }

    /// Append a jittered line by `(dx, dy)` from the path's current point.
    ///
    /// Ends exactly at `current + (dx, dy)`. Returns the number of segments
    /// appended, including the final snap.
    pub fn line(&self, path: &mut Path, dx: f64, dy: f64, noise: &mut NoiseSource) -> Result<usize> {
        let distance_squared = dx * dx + dy * dy;
        ensure_finite("displacement", distance_squared)?;

        if distance_squared <= self.error_threshold() {
            path.rel_line_to(dx, dy);
            return Ok(1);
        }

        let estimate = (distance_squared.sqrt() / self.length).ceil();
        ensure_at_most("segments", estimate, MAX_SEGMENTS as f64)?;

        let angle = dy.atan2(dx);
        let mut remaining_x = dx;
        let mut remaining_y = dy;
        let mut offset = noise.start_offset();

        // Sideways drift can keep the remainder above one segment after the
        // target has been passed; the ceiling stops the walk there.
        let max_steps = estimate as usize * 2 + 2;
        let mut steps = 0;

        while remaining_x * remaining_x + remaining_y * remaining_y > self.distance_squared()
            && steps < max_steps
        {
            let angle_with_error = angle + angular_error(offset, LINE_ERROR_DIVISOR);
            let step_x = angle_with_error.cos() * self.length;
            let step_y = angle_with_error.sin() * self.length;
            path.rel_line_to(step_x, step_y);
            remaining_x -= step_x;
            remaining_y -= step_y;
            offset += 1.0;
            steps += 1;
        }

        path.rel_line_to(remaining_x, remaining_y);
        trace!(dx, dy, segments = steps + 1, "jittered line");
        Ok(steps + 1)
    }

    /// Append a jittered arc.
    ///
    /// An empty path starts with a move to the arc's start point; otherwise a
    /// line joins the current point to it. Returns the number of segments
    /// appended after that join, including the final snap.
    pub fn arc(&self, path: &mut Path, arc: &Arc, noise: &mut NoiseSource) -> Result<usize> {
        arc.validate()?;

        // Full steps taken while more than the straight gap is left.
        let length = arc.length();
        let steps = ((length - self.circle_straight_gap()) / self.length).ceil().max(0.0);
        let steps = ensure_at_most("segments", steps, MAX_SEGMENTS as f64)? as usize;

        let start = arc.start_point();
        if path.is_empty() {
            path.move_to(start);
        } else {
            path.line_to(start);
        }

        let angle_step = 2.0 * PI / (arc.circumference() / self.length);
        let first_angle = arc.start_angle.to_radians() + angle_step / 2.0;
        let start_offset = noise.start_offset();

        for step in 0..steps {
            let remaining = length - step as f64 * self.length;
            let error = angular_error(start_offset + step as f64, ARC_ERROR_DIVISOR)
                * taper(remaining, self.length);
            let angle_with_error = first_angle + step as f64 * angle_step + error;
            path.rel_line_to(
                angle_with_error.cos() * self.length,
                angle_with_error.sin() * self.length,
            );
        }

        path.line_to(arc.end_point());
        trace!(
            radius = arc.radius,
            start = arc.start_angle,
            end = arc.end_angle,
            segments = steps + 1,
            "jittered arc"
        );
        Ok(steps + 1)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn line_from_origin(dx: f64, dy: f64, seed: u64) -> Path {
        let mut path = Path::starting_at(Point::ZERO);
        let mut noise = NoiseSource::new(seed);
        Segmenter::default()
            .line(&mut path, dx, dy, &mut noise)
            .expect("finite line");
        path
    }

    #[test]
    fn short_line_is_a_single_exact_segment() {
        let path = line_from_origin(6.0, 6.0, 1);
        assert_eq!(path.len(), 2);
        assert_eq!(path.current_point(), Point::new(6.0, 6.0));
    }

    #[test]
    fn zero_displacement_is_degenerate_not_an_error() {
        let path = line_from_origin(0.0, 0.0, 9);
        assert_eq!(path.len(), 2);
        assert_eq!(path.current_point(), Point::ZERO);
    }

    #[test]
    fn long_line_lands_on_target() {
        for seed in 0..50 {
            let path = line_from_origin(137.0, -42.5, seed);
            let end = path.current_point();
            assert!((end.x - 137.0).abs() < EPSILON, "seed {seed}: x = {}", end.x);
            assert!((end.y + 42.5).abs() < EPSILON, "seed {seed}: y = {}", end.y);
        }
    }

    #[test]
    fn line_segments_respect_length_bound() {
        let path = line_from_origin(250.0, 80.0, 3);
        let segments = path.segments();
        assert!(segments.len() > 20);
        for (from, to) in &segments {
            assert!(from.distance(*to) <= SEGMENT_LENGTH + EPSILON);
        }
    }

    #[test]
    fn line_actually_wobbles() {
        let path = line_from_origin(200.0, 0.0, 5);
        let max_deviation = path
            .points()
            .iter()
            .map(|p| p.y.abs())
            .fold(0.0, f64::max);
        assert!(max_deviation > 0.01, "expected visible jitter, got {max_deviation}");
    }

    #[test]
    fn non_finite_line_is_rejected() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(0);
        let segmenter = Segmenter::default();
        assert!(segmenter.line(&mut path, f64::NAN, 1.0, &mut noise).is_err());
        assert!(segmenter.line(&mut path, 1.0, f64::INFINITY, &mut noise).is_err());
        assert!(segmenter.line(&mut path, 1e200, 1e200, &mut noise).is_err());
        assert!(path.is_empty());
    }

    #[test]
    fn segment_length_must_be_positive() {
        assert!(Segmenter::new(0.0).is_err());
        assert!(Segmenter::new(-1.0).is_err());
        assert!(Segmenter::new(f64::NAN).is_err());
        assert_eq!(Segmenter::new(4.0).map(|s| s.length()), Ok(4.0));
    }

    #[test]
    fn derived_constants() {
        let segmenter = Segmenter::default();
        assert_eq!(segmenter.distance_squared(), 64.0);
        assert_eq!(segmenter.error_threshold(), 96.0);
        assert_eq!(segmenter.circle_straight_gap(), 12.0);
    }

    #[test]
    fn arc_on_empty_path_starts_with_move() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(2);
        let arc = Arc::new(Point::new(50.0, 50.0), 20.0, 0.0, 90.0);
        Segmenter::default().arc(&mut path, &arc, &mut noise).expect("finite arc");

        let first = path.first_point().expect("arc emits points");
        assert!((first.x - 50.0).abs() < EPSILON);
        assert!((first.y - 30.0).abs() < EPSILON);

        let last = path.current_point();
        assert!((last.x - 70.0).abs() < EPSILON);
        assert!((last.y - 50.0).abs() < EPSILON);
    }

    #[test]
    fn arc_on_non_empty_path_joins_with_line() {
        let mut path = Path::starting_at(Point::new(0.0, 0.0));
        let mut noise = NoiseSource::new(2);
        let arc = Arc::new(Point::new(50.0, 50.0), 20.0, 0.0, 90.0);
        Segmenter::default().arc(&mut path, &arc, &mut noise).expect("finite arc");

        let moves = path
            .commands()
            .iter()
            .filter(|c| matches!(c, crate::path::PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
        assert_eq!(path.segments()[0].1, arc.start_point());
    }

    #[test]
    fn arc_steps_have_segment_length() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(8);
        let arc = Arc::new(Point::ZERO, 60.0, 0.0, 270.0);
        Segmenter::default().arc(&mut path, &arc, &mut noise).expect("finite arc");

        let segments = path.segments();
        // Everything but the final snap is a full-length step.
        for (from, to) in &segments[..segments.len() - 1] {
            assert!((from.distance(*to) - SEGMENT_LENGTH).abs() < 1e-6);
        }
    }

    #[test]
    fn taper_is_non_increasing_towards_the_end() {
        let mut remaining = 200.0;
        let mut previous = taper(remaining, SEGMENT_LENGTH);
        assert_eq!(previous, 1.0);
        while remaining > SEGMENT_LENGTH * 1.5 {
            remaining -= SEGMENT_LENGTH;
            let current = taper(remaining, SEGMENT_LENGTH);
            assert!(current <= previous);
            previous = current;
        }
        // Last jittered step before the snap is damped well below full strength.
        assert!(taper(12.5, SEGMENT_LENGTH) < 0.5);
    }

    #[test]
    fn arc_jitter_fades_out_before_the_snap() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(11);
        let arc = Arc::new(Point::new(100.0, 100.0), 60.0, 0.0, 270.0);
        let segmenter = Segmenter::default();
        let appended = segmenter.arc(&mut path, &arc, &mut noise).expect("finite arc");

        let segments = path.segments();
        let steps = &segments[..segments.len() - 1];
        assert_eq!(steps.len() + 1, appended);
        let expected_steps = ((arc.length() - segmenter.circle_straight_gap()) / SEGMENT_LENGTH).ceil();
        assert_eq!(steps.len(), expected_steps as usize);

        let angle_step = 2.0 * PI / (arc.circumference() / SEGMENT_LENGTH);
        let full_bound = 1.0 / ARC_ERROR_DIVISOR;
        let errors: Vec<(f64, f64)> = steps
            .iter()
            .enumerate()
            .map(|(i, (from, to))| {
                let heading = (to.y - from.y).atan2(to.x - from.x);
                let ideal = angle_step / 2.0 + i as f64 * angle_step;
                let error = (heading - ideal + PI).rem_euclid(2.0 * PI) - PI;
                let remaining = arc.length() - i as f64 * SEGMENT_LENGTH;
                (error.abs(), full_bound * taper(remaining, SEGMENT_LENGTH))
            })
            .collect();

        for (i, (error, bound)) in errors.iter().enumerate() {
            assert!(*error <= bound + 1e-9, "step {i}: error {error} above {bound}");
        }
        let mid = errors.len() / 2;
        assert_eq!(errors[mid].1, full_bound);
        assert!(errors[..mid].iter().any(|(error, _)| *error > 1e-3), "arc should wobble");

        let (last_error, last_bound) = *errors.last().unwrap();
        assert!(last_bound < full_bound);
        assert!(last_error <= errors[mid].1);
    }

    #[test]
    fn oversize_line_is_rejected() {
        let mut path = Path::starting_at(Point::ZERO);
        let mut noise = NoiseSource::new(0);
        let segmenter = Segmenter::default();

        for dx in [1e9, 1e17] {
            assert!(matches!(
                segmenter.line(&mut path, dx, 0.0, &mut noise),
                Err(SketchError::TooLarge { name: "segments", .. })
            ));
        }
        assert_eq!(path.len(), 1);

        // The largest allowed line still lands on its target.
        let dx = MAX_SEGMENTS as f64 * SEGMENT_LENGTH;
        segmenter.line(&mut path, dx, 0.0, &mut noise).expect("line at the limit");
        assert!((path.current_point().x - dx).abs() < 1e-3);
    }

    #[test]
    fn oversize_arc_is_rejected() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(0);
        let segmenter = Segmenter::default();

        let huge_sweep = Arc::new(Point::ZERO, 10.0, 0.0, 1e300);
        let huge_radius = Arc::new(Point::ZERO, 1e12, 0.0, 90.0);
        for arc in [huge_sweep, huge_radius] {
            assert!(matches!(
                segmenter.arc(&mut path, &arc, &mut noise),
                Err(SketchError::TooLarge { name: "segments", .. })
            ));
        }
        assert!(path.is_empty());
    }

    #[test]
    fn zero_radius_arc_is_degenerate() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(0);
        let arc = Arc::new(Point::new(3.0, 4.0), 0.0, 0.0, 360.0);
        let segments = Segmenter::default().arc(&mut path, &arc, &mut noise).expect("finite arc");
        assert_eq!(segments, 1);
        assert_eq!(path.current_point(), Point::new(3.0, 4.0));
    }

    #[test]
    fn non_finite_arc_is_rejected() {
        let mut path = Path::new();
        let mut noise = NoiseSource::new(0);
        let arc = Arc::new(Point::ZERO, f64::NAN, 0.0, 90.0);
        assert!(matches!(
            Segmenter::default().arc(&mut path, &arc, &mut noise),
            Err(SketchError::InvalidParameter { name: "radius", .. })
        ));
        assert!(path.is_empty());
    }
}
