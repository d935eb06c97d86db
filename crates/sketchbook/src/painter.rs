//! Painters: put generated shapes onto a draw surface.
//!
//! A [`Tracer`] strokes shape outlines. A [`Filler`] clips the surface to
//! the outline and hatches the shape's bounding box inside that clip, which
//! is how a circle ends up cross-hatched without the hatch knowing anything
//! about circles.

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::hatch::{HatchFiller, Orientation};
use crate::path::Path;
use crate::surface::{DrawSurface, Paint};
use crate::tool::GeometryTool;

/// Draws shapes with a given paint and seed.
pub trait Painter {
    /// Line from `start` by `(dx, dy)`.
    fn draw_line(
        &self,
        surface: &mut dyn DrawSurface,
        start: Point,
        dx: f64,
        dy: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()>;

    fn draw_rect(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()>;

    fn draw_circle(
        &self,
        surface: &mut dyn DrawSurface,
        center: Point,
        radius: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()>;

    /// Capsule filling `rect`, with end caps of radius `rect.height / 2`.
    fn draw_capsule(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()>;
}

/// Strokes a single line from `start` through the tool.
fn stroke_line<G: GeometryTool>(
    tool: &G,
    surface: &mut dyn DrawSurface,
    start: Point,
    dx: f64,
    dy: f64,
    paint: &Paint,
    seed: u64,
) -> Result<()> {
    let path = tool.line_path(dx, dy, seed, Some(Path::starting_at(start)))?;
    surface.draw_path(&path, paint);
    Ok(())
}

// ============================================================================
// TRACER
// ============================================================================

/// Outlines shapes.
#[derive(Debug, Clone, Default)]
pub struct Tracer<G> {
    tool: G,
}

impl<G: GeometryTool> Tracer<G> {
    pub fn new(tool: G) -> Self {
        Self { tool }
    }

    /// Continue `path` with a line from `start` by `(dx, dy)` and stroke it.
    ///
    /// An empty path moves to `start`; otherwise a line joins the current
    /// point to `start` first, so consecutive calls draw one connected stroke.
    pub fn draw_line_into(
        &self,
        surface: &mut dyn DrawSurface,
        path: Path,
        start: Point,
        dx: f64,
        dy: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<Path> {
        let mut path = path;
        if path.is_empty() {
            path.move_to(start);
        } else {
            path.line_to(start);
        }
        let path = self.tool.line_path(dx, dy, seed, Some(path))?;
        surface.draw_path(&path, paint);
        Ok(path)
    }
}

impl<G: GeometryTool> Painter for Tracer<G> {
    fn draw_line(
        &self,
        surface: &mut dyn DrawSurface,
        start: Point,
        dx: f64,
        dy: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()> {
        stroke_line(&self.tool, surface, start, dx, dy, paint, seed)
    }

    fn draw_rect(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()> {
        let path = self.tool.rectangle_path(rect.left, rect.top, rect.width, rect.height, seed)?;
        surface.draw_path(&path, paint);
        Ok(())
    }

    fn draw_circle(
        &self,
        surface: &mut dyn DrawSurface,
        center: Point,
        radius: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()> {
        let path = self.tool.circle_path(center.x, center.y, radius, seed)?;
        surface.draw_path(&path, paint);
        Ok(())
    }

    fn draw_capsule(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()> {
        let path = self.tool.capsule_path(rect.left, rect.top, rect.width, rect.height, seed)?;
        surface.draw_path(&path, paint);
        Ok(())
    }
}

// ============================================================================
// FILLER
// ============================================================================

/// Hatch-fills shapes, clipped to their hand-drawn outline.
///
/// The paint's stroke width sets the hatch spacing.
#[derive(Debug, Clone)]
pub struct Filler<G> {
    tool: G,
    hatch: HatchFiller,
}

impl<G: GeometryTool> Filler<G> {
    pub fn new(tool: G, orientation: Orientation) -> Self {
        Self { tool, hatch: HatchFiller::new(orientation) }
    }

    pub fn orientation(&self) -> Orientation {
        self.hatch.orientation()
    }

    fn fill_clipped(
        &self,
        surface: &mut dyn DrawSurface,
        outline: &Path,
        bounds: Rect,
        paint: &Paint,
        seed: u64,
    ) -> Result<()> {
        let lines = self.hatch.fill(bounds, paint.stroke_width, seed)?;
        surface.save();
        surface.clip_path(outline);
        for line in &lines {
            surface.draw_line(*line, paint);
        }
        surface.restore()?;
        debug!(strokes = lines.len(), "clipped hatch");
        Ok(())
    }
}

impl<G: GeometryTool> Painter for Filler<G> {
    fn draw_line(
        &self,
        surface: &mut dyn DrawSurface,
        start: Point,
        dx: f64,
        dy: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()> {
        stroke_line(&self.tool, surface, start, dx, dy, paint, seed)
    }

    fn draw_rect(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()> {
        let outline = self.tool.rectangle_path(rect.left, rect.top, rect.width, rect.height, seed)?;
        self.fill_clipped(surface, &outline, rect, paint, seed)
    }

    fn draw_circle(
        &self,
        surface: &mut dyn DrawSurface,
        center: Point,
        radius: f64,
        paint: &Paint,
        seed: u64,
    ) -> Result<()> {
        let outline = self.tool.circle_path(center.x, center.y, radius, seed)?;
        self.fill_clipped(surface, &outline, Rect::around_circle(center, radius), paint, seed)
    }

    fn draw_capsule(&self, surface: &mut dyn DrawSurface, rect: Rect, paint: &Paint, seed: u64) -> Result<()> {
        let outline = self.tool.capsule_path(rect.left, rect.top, rect.width, rect.height, seed)?;
        self.fill_clipped(surface, &outline, rect, paint, seed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
