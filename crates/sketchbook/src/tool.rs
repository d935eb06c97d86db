//! Geometry tools: turn ideal shape requests into paths.
//!
//! [`GeometryTool`] has two implementations:
//! - [`HandDrawnTool`] jitters every line and arc so the result looks
//!   pencil-drawn.
//! - [`ExactTool`] draws the ideal geometry, for previews and tests.
//!
//! Every public operation takes an explicit seed. The tool builds one fresh
//! [`NoiseSource`] from it per call, so redrawing with the same seed yields
//! the same path and no random state survives between calls.
//!
//! # Example
//! ```
//! use sketchbook::{GeometryTool, HandDrawnTool, Point};
//!
//! let tool = HandDrawnTool::default();
//! let path = tool.rectangle_path(0.0, 0.0, 50.0, 30.0, 7).unwrap();
//! assert_eq!(path.last_point(), Some(Point::new(0.0, 0.0)));
//! ```

use tracing::debug;

use crate::error::{Result, ensure_at_most, ensure_finite};
use crate::geometry::Point;
use crate::noise::NoiseSource;
use crate::path::Path;
use crate::segment::{Arc, MAX_SEGMENTS, Segmenter};

/// Builds line, rectangle, circle, arc and capsule paths.
///
/// Implementors provide [`trace_line`](Self::trace_line) and
/// [`trace_arc`](Self::trace_arc); the shape operations are composed from
/// those two and validate their inputs before any command is appended.
pub trait GeometryTool {
    /// Append a line by `(dx, dy)` from the path's current point.
    fn trace_line(&self, path: &mut Path, dx: f64, dy: f64, noise: &mut NoiseSource) -> Result<()>;

    /// Append an arc. Starts with a move when `path` is empty, with a line
    /// to the arc's start point otherwise.
    fn trace_arc(&self, path: &mut Path, arc: &Arc, noise: &mut NoiseSource) -> Result<()>;

    /// Line by `(dx, dy)` appended to `path`, or to a new path starting at the origin.
    fn line_path(&self, dx: f64, dy: f64, seed: u64, path: Option<Path>) -> Result<Path> {
        ensure_finite("dx", dx)?;
        ensure_finite("dy", dy)?;
        let mut path = path.unwrap_or_default();
        let mut noise = NoiseSource::new(seed);
        self.trace_line(&mut path, dx, dy, &mut noise)?;
        Ok(path)
    }

    /// Closed rectangle with its first corner at `(x, y)`.
    ///
    /// Edges are traced clockwise (on screen): right, down, left, up.
    fn rectangle_path(&self, x: f64, y: f64, width: f64, height: f64, seed: u64) -> Result<Path> {
        let corner = Point::new(ensure_finite("x", x)?, ensure_finite("y", y)?);
        ensure_finite("width", width)?;
        ensure_finite("height", height)?;

        let mut path = Path::starting_at(corner);
        let mut noise = NoiseSource::new(seed);
        self.trace_line(&mut path, width, 0.0, &mut noise)?;
        self.trace_line(&mut path, 0.0, height, &mut noise)?;
        self.trace_line(&mut path, -width, 0.0, &mut noise)?;
        self.trace_line(&mut path, 0.0, -height, &mut noise)?;
        path.close();
        debug!(x, y, width, height, commands = path.len(), "rectangle path");
        Ok(path)
    }

    /// Closed full circle, starting and ending at its top point.
    fn circle_path(&self, center_x: f64, center_y: f64, radius: f64, seed: u64) -> Result<Path> {
        let mut path = self.arc_path(center_x, center_y, radius, 0.0, 360.0, seed, None)?;
        path.close();
        debug!(center_x, center_y, radius, commands = path.len(), "circle path");
        Ok(path)
    }

    /// Arc from `start_angle` to `end_angle` (degrees, clockwise from up),
    /// appended to `path` or to a new path.
    #[allow(clippy::too_many_arguments)]
    fn arc_path(
        &self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        seed: u64,
        path: Option<Path>,
    ) -> Result<Path> {
        let arc = Arc::new(Point::new(center_x, center_y), radius, start_angle, end_angle);
        let mut path = path.unwrap_or_default();
        let mut noise = NoiseSource::new(seed);
        self.trace_arc(&mut path, &arc, &mut noise)?;
        Ok(path)
    }

    /// Closed capsule (stadium) filling the box at `(x, y)` of the given size.
    ///
    /// The end caps are half circles of radius `height / 2`, joined by two
    /// straight runs of `width - height`.
    fn capsule_path(&self, x: f64, y: f64, width: f64, height: f64, seed: u64) -> Result<Path> {
        ensure_finite("x", x)?;
        ensure_finite("y", y)?;
        ensure_finite("width", width)?;
        ensure_finite("height", height)?;

        let radius = height / 2.0;
        let straight_width = width - height;
        let start_center = Point::new(x + radius, y + radius);
        let end_center = start_center.offset(straight_width, 0.0);

        let mut path = Path::new();
        let mut noise = NoiseSource::new(seed);
        self.trace_arc(&mut path, &Arc::new(start_center, radius, -180.0, 0.0), &mut noise)?;
        self.trace_line(&mut path, straight_width, 0.0, &mut noise)?;
        self.trace_arc(&mut path, &Arc::new(end_center, radius, 0.0, 180.0), &mut noise)?;
        self.trace_line(&mut path, -straight_width, 0.0, &mut noise)?;
        path.close();
        debug!(x, y, width, height, commands = path.len(), "capsule path");
        Ok(path)
    }
}

// ============================================================================
// HAND-DRAWN
// ============================================================================

/// Pencil-style geometry built from jittered fixed-length segments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandDrawnTool {
    segmenter: Segmenter,
}

impl HandDrawnTool {
    /// Tool with a custom segment length.
    ///
    /// Shorter segments give a finer, busier wobble.
    pub fn with_segment_length(length: f64) -> Result<Self> {
        Ok(Self { segmenter: Segmenter::new(length)? })
    }
}

impl GeometryTool for HandDrawnTool {
    fn trace_line(&self, path: &mut Path, dx: f64, dy: f64, noise: &mut NoiseSource) -> Result<()> {
        self.segmenter.line(path, dx, dy, noise).map(|_| ())
    }

    fn trace_arc(&self, path: &mut Path, arc: &Arc, noise: &mut NoiseSource) -> Result<()> {
        self.segmenter.arc(path, arc, noise).map(|_| ())
    }
}

// ============================================================================
// EXACT
// ============================================================================

/// Ideal geometry with no jitter.
///
/// Lines are single segments; arcs are polylines with one vertex per
/// `step_degrees` so they can share the same path representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactTool {
    step_degrees: f64,
}

impl Default for ExactTool {
    fn default() -> Self {
        Self { step_degrees: 5.0 }
    }
}

impl GeometryTool for ExactTool {
    fn trace_line(&self, path: &mut Path, dx: f64, dy: f64, _noise: &mut NoiseSource) -> Result<()> {
        ensure_finite("dx", dx)?;
        ensure_finite("dy", dy)?;
        path.rel_line_to(dx, dy);
        Ok(())
    }

    fn trace_arc(&self, path: &mut Path, arc: &Arc, _noise: &mut NoiseSource) -> Result<()> {
        arc.validate()?;
        let sweep = arc.end_angle - arc.start_angle;
        let steps = (sweep.abs() / self.step_degrees).ceil().max(1.0);
        let steps = ensure_at_most("segments", steps, MAX_SEGMENTS as f64)? as usize;

        let start = arc.start_point();
        if path.is_empty() {
            path.move_to(start);
        } else {
            path.line_to(start);
        }

        for i in 1..steps {
            let angle = arc.start_angle + sweep * (i as f64 / steps as f64);
            path.line_to(Point::on_circle(arc.center, arc.radius, angle));
        }
        path.line_to(arc.end_point());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
