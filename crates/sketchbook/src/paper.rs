//! Paper backgrounds.
//!
//! - [`GridPaper`]: flat background with a square grid.
//! - [`TornPaper`]: wraps another paper and cuts its top edge into a ragged
//!   tear, generated by recursive midpoint displacement.

use tracing::debug;

use crate::error::{Result, ensure_at_most, ensure_finite};
use crate::geometry::{Line, Point};
use crate::noise::NoiseSource;
use crate::path::Path;
use crate::surface::{DrawSurface, Paint};

/// Factor the jitter range shrinks by at each subdivision level.
const TEAR_RANGE_DECAY: f64 = 1.5;

/// Largest page width or height a paper will draw.
pub const MAX_PAGE_SIZE: f64 = 100_000.0;

/// Finite page dimension no larger than [`MAX_PAGE_SIZE`].
fn page_dimension(name: &'static str, value: f64) -> Result<f64> {
    ensure_at_most(name, ensure_finite(name, value)?, MAX_PAGE_SIZE)
}

/// A background drawn underneath the sketch.
pub trait Paper {
    fn draw(&self, surface: &mut dyn DrawSurface, width: f64, height: f64, seed: u64) -> Result<()>;
}

/// Full-page rectangle path.
fn page_path(width: f64, height: f64) -> Path {
    let mut path = Path::starting_at(Point::ZERO);
    path.line_to(Point::new(width, 0.0));
    path.line_to(Point::new(width, height));
    path.line_to(Point::new(0.0, height));
    path.close();
    path
}

// ============================================================================
// GRID
// ============================================================================

/// Square-ruled paper.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPaper {
    /// Grid pitch in whole drawing units.
    pub cell_size: u32,
    pub background: String,
    pub line_paint: Paint,
}

impl Default for GridPaper {
    fn default() -> Self {
        Self {
            cell_size: 24,
            background: "#fdfdf8".to_string(),
            line_paint: Paint::new("#c8d8e8", 1.0),
        }
    }
}

impl GridPaper {
    /// Grid lines for a page of the given size.
    ///
    /// Lines sit on the last unit of each cell, at `cell - 1, 2 * cell - 1, ...`.
    pub fn lines(&self, width: f64, height: f64) -> Result<Vec<Line>> {
        let width = page_dimension("width", width)?;
        let height = page_dimension("height", height)?;
        let mut lines = Vec::new();
        if self.cell_size == 0 {
            return Ok(lines);
        }
        let step = self.cell_size as usize;

        let columns = width.max(0.0).ceil() as usize;
        for x in (step - 1..columns).step_by(step) {
            let x = x as f64;
            lines.push(Line::new(x, 0.0, x, height));
        }

        let rows = height.max(0.0).ceil() as usize;
        for y in (step - 1..rows).step_by(step) {
            let y = y as f64;
            lines.push(Line::new(0.0, y, width, y));
        }
        Ok(lines)
    }
}

impl Paper for GridPaper {
    fn draw(&self, surface: &mut dyn DrawSurface, width: f64, height: f64, _seed: u64) -> Result<()> {
        let lines = self.lines(width, height)?;
        surface.fill_path(&page_path(width, height), &self.background);
        for line in lines {
            surface.draw_line(line, &self.line_paint);
        }
        Ok(())
    }
}

// ============================================================================
// TORN
// ============================================================================

/// Paper with a ragged, torn top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TornPaper<P> {
    paper: P,
    /// Distance from the top of the page to the middle of the tear.
    pub top_margin: f64,
    /// Jitter range at the first subdivision.
    pub max_jitter: f64,
    pub tear_paint: Paint,
}

impl<P: Paper> TornPaper<P> {
    pub fn new(paper: P) -> Self {
        Self {
            paper,
            top_margin: 16.0,
            max_jitter: 8.0,
            tear_paint: Paint::new("#e8e4d8", 8.0),
        }
    }

    /// Tear heights at `x = 0, 1, ..., width`.
    ///
    /// Both ends sit at `top_margin - max_jitter / 2`; every point in between
    /// stays within `1.5 * max_jitter` of that. Widths above
    /// [`MAX_PAGE_SIZE`] are rejected.
    pub fn tear_edge(&self, width: f64, seed: u64) -> Result<Vec<f64>> {
        let width = page_dimension("width", width)?;
        ensure_finite("top_margin", self.top_margin)?;
        ensure_finite("max_jitter", self.max_jitter)?;

        let end = width.max(0.0).round() as usize;
        let initial = self.top_margin - self.max_jitter / 2.0;
        let mut points = vec![initial; end + 1];
        let mut noise = NoiseSource::new(seed);
        tear_and_divide(&mut points, 0, end, self.max_jitter, &mut noise);
        Ok(points)
    }

    /// Page silhouette: the tear along the top, then down past the bottom
    /// corners so the tear stroke does not show there.
    pub fn outline(&self, width: f64, height: f64, seed: u64) -> Result<Path> {
        let height = page_dimension("height", height)?;
        let edge = self.tear_edge(width, seed)?;
        let off_canvas = self.tear_paint.stroke_width / 2.0 - 1.0;

        let mut path = Path::new();
        for (x, y) in edge.iter().enumerate() {
            let point = Point::new(x as f64, *y);
            if path.is_empty() {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        path.line_to(Point::new(width + off_canvas, height + off_canvas));
        path.line_to(Point::new(-off_canvas, height + off_canvas));
        path.close();
        Ok(path)
    }
}

impl<P: Paper> Paper for TornPaper<P> {
    fn draw(&self, surface: &mut dyn DrawSurface, width: f64, height: f64, seed: u64) -> Result<()> {
        let outline = self.outline(width, height, seed)?;
        surface.save();
        surface.clip_path(&outline);
        self.paper.draw(surface, width, height, seed)?;
        surface.draw_path(&outline, &self.tear_paint);
        surface.restore()?;
        debug!(width, height, commands = outline.len(), "torn paper");
        Ok(())
    }
}

fn tear_and_divide(points: &mut [f64], left: usize, right: usize, range: f64, noise: &mut NoiseSource) {
    if right - left <= 1 {
        return;
    }

    let left_value = points[left];
    let right_value = points[right];
    let jitter = left_value - range / 2.0 + noise.next_unit() * (right_value - left_value + range);

    let middle = (left + right) / 2;
    points[middle] = jitter;
    tear_and_divide(points, left, middle, range / TEAR_RANGE_DECAY, noise);
    tear_and_divide(points, middle, right, range / TEAR_RANGE_DECAY, noise);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SketchError;
    use crate::surface::SvgSurface;

    #[test]
    fn grid_lines_sit_on_cell_ends() {
        let paper = GridPaper { cell_size: 10, ..GridPaper::default() };
        let lines = paper.lines(35.0, 20.0).unwrap();

        let vertical: Vec<f64> = lines.iter().filter(|l| l.x1 == l.x2).map(|l| l.x1).collect();
        let horizontal: Vec<f64> = lines.iter().filter(|l| l.y1 == l.y2).map(|l| l.y1).collect();
        assert_eq!(vertical, vec![9.0, 19.0, 29.0]);
        assert_eq!(horizontal, vec![9.0, 19.0]);
    }

    #[test]
    fn zero_cell_size_draws_no_grid() {
        let paper = GridPaper { cell_size: 0, ..GridPaper::default() };
        assert!(paper.lines(100.0, 100.0).unwrap().is_empty());
    }

    #[test]
    fn tear_edge_is_pinned_and_bounded() {
        let torn = TornPaper::new(GridPaper::default());
        let edge = torn.tear_edge(300.0, 5).unwrap();
        assert_eq!(edge.len(), 301);

        let pinned = torn.top_margin - torn.max_jitter / 2.0;
        assert_eq!(edge[0], pinned);
        assert_eq!(edge[300], pinned);
        for y in &edge {
            assert!((y - pinned).abs() <= 1.5 * torn.max_jitter, "tear at {y}");
        }
        assert!(edge.iter().any(|y| (y - pinned).abs() > 1e-9), "edge should be ragged");
    }

    #[test]
    fn tear_edge_is_deterministic() {
        let torn = TornPaper::new(GridPaper::default());
        assert_eq!(torn.tear_edge(120.0, 3).unwrap(), torn.tear_edge(120.0, 3).unwrap());
        assert_ne!(torn.tear_edge(120.0, 3).unwrap(), torn.tear_edge(120.0, 4).unwrap());
    }

    #[test]
    fn outline_wraps_below_the_page() {
        let torn = TornPaper::new(GridPaper::default());
        let outline = torn.outline(50.0, 80.0, 1).unwrap();
        assert!(outline.is_closed());
        // 51 tear points, two bottom corners, close.
        assert_eq!(outline.len(), 54);
        let lowest = outline.points().iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert_eq!(lowest, 83.0);
    }

    #[test]
    fn torn_paper_renders_clipped_grid() {
        let torn = TornPaper::new(GridPaper::default());
        let mut surface = SvgSurface::new(100.0, 100.0);
        torn.draw(&mut surface, 100.0, 100.0, 2).unwrap();
        assert_eq!(surface.save_depth(), 0);

        let svg = surface.finish();
        assert!(svg.contains("<clipPath"));
        assert!(svg.contains(r##"fill="#fdfdf8""##));
        assert!(svg.contains("<line"));
    }

    #[test]
    fn non_finite_size_is_rejected() {
        let torn = TornPaper::new(GridPaper::default());
        assert!(torn.tear_edge(f64::NAN, 0).is_err());
        assert!(torn.outline(10.0, f64::INFINITY, 0).is_err());
    }

    #[test]
    fn oversize_page_is_rejected() {
        let torn = TornPaper::new(GridPaper::default());
        assert!(matches!(
            torn.tear_edge(1e12, 0),
            Err(SketchError::TooLarge { name: "width", .. })
        ));
        assert!(matches!(
            torn.outline(100.0, 1e12, 0),
            Err(SketchError::TooLarge { name: "height", .. })
        ));
        assert_eq!(torn.tear_edge(MAX_PAGE_SIZE, 0).unwrap().len(), 100_001);

        let grid = GridPaper::default();
        assert!(matches!(
            grid.lines(100.0, 1e12),
            Err(SketchError::TooLarge { name: "height", .. })
        ));

        let mut surface = SvgSurface::new(100.0, 100.0);
        assert!(grid.draw(&mut surface, 1e12, 100.0, 0).is_err());
        assert!(torn.draw(&mut surface, 1e12, 100.0, 0).is_err());
        assert_eq!(surface.save_depth(), 0);
    }
}
