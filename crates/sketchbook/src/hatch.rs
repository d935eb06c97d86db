//! Hand-drawn hatch fills.
//!
//! Generates zig-zag strokes across a bounding box: each stroke runs from
//! one side to the other while drifting a random step down (or across), then
//! the next runs back. The filler only knows the box; clip the render target
//! to the real silhouette before drawing the strokes.

use tracing::debug;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SketchError, ensure_at_most, ensure_finite};
use crate::geometry::{Line, Rect};
use crate::noise::NoiseSource;
use crate::segment::MAX_SEGMENTS;

/// Largest row step as a fraction of the stroke width.
const MAX_STEP_FACTOR: f64 = 0.95;

/// Smallest row step as a fraction of the largest.
const MIN_STEP_FACTOR: f64 = 0.25;

/// Direction the hatch strokes sweep across the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Strokes run left-right, rows advance downward.
    Horizontal,
    /// Strokes run top-bottom, columns advance rightward.
    Vertical,
    /// Horizontal pass followed by a vertical pass.
    Both,
}

impl Orientation {
    pub fn all() -> &'static [Orientation] {
        &[Orientation::Horizontal, Orientation::Vertical, Orientation::Both]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
            Orientation::Both => "both",
        }
    }

    /// Parse an orientation name; `cross` is accepted for [`Orientation::Both`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Some(Orientation::Horizontal),
            "vertical" | "v" => Some(Orientation::Vertical),
            "both" | "cross" => Some(Orientation::Both),
            _ => None,
        }
    }
}

/// Row spacing derived from the stroke width.
///
/// Thicker strokes give sparser, bolder hatching.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StepRange {
    min: f64,
    margin: f64,
}

impl StepRange {
    fn for_stroke_width(stroke_width: f64) -> Self {
        let max = stroke_width * MAX_STEP_FACTOR;
        let min = max * MIN_STEP_FACTOR;
        Self { min, margin: max - min }
    }

    #[inline]
    fn next(&self, noise: &mut NoiseSource) -> f64 {
        noise.next_unit() * self.margin + self.min
    }

    /// Most stroke pairs needed to cross `extent`.
    fn pair_limit(&self, extent: f64) -> f64 {
        (extent.abs() / self.min).ceil() + 1.0
    }
}

/// Fills bounding boxes with hand-drawn hatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatchFiller {
    orientation: Orientation,
}

impl Default for HatchFiller {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl HatchFiller {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Hatch strokes covering `bounds`, spaced for `stroke_width`.
    ///
    /// The stroke width must be finite and positive, otherwise the rows
    /// would never advance. Boxes needing more than [`MAX_SEGMENTS`] strokes
    /// are rejected.
    pub fn fill(&self, bounds: Rect, stroke_width: f64, seed: u64) -> Result<Vec<Line>> {
        ensure_finite("left", bounds.left)?;
        ensure_finite("top", bounds.top)?;
        ensure_finite("width", bounds.width)?;
        ensure_finite("height", bounds.height)?;
        if !stroke_width.is_finite() || stroke_width <= 0.0 {
            return Err(SketchError::InvalidStrokeWidth(stroke_width));
        }

        let steps = StepRange::for_stroke_width(stroke_width);
        let rows = steps.pair_limit(bounds.height);
        let columns = steps.pair_limit(bounds.width);
        let pairs = match self.orientation {
            Orientation::Horizontal => rows,
            Orientation::Vertical => columns,
            Orientation::Both => rows + columns,
        };
        ensure_at_most("strokes", pairs * 2.0, MAX_SEGMENTS as f64)?;
        let (rows, columns) = (rows as usize, columns as usize);

        let mut noise = NoiseSource::new(seed);
        let mut lines = Vec::new();
        match self.orientation {
            Orientation::Horizontal => horizontal_fill(&bounds, &steps, rows, &mut noise, &mut lines),
            Orientation::Vertical => vertical_fill(&bounds, &steps, columns, &mut noise, &mut lines),
            Orientation::Both => {
                horizontal_fill(&bounds, &steps, rows, &mut noise, &mut lines);
                vertical_fill(&bounds, &steps, columns, &mut noise, &mut lines);
            }
        }

        debug!(
            orientation = self.orientation.name(),
            stroke_width,
            strokes = lines.len(),
            "hatch fill"
        );
        Ok(lines)
    }
}

/// Hatch strokes for the box at `(left, top)` of size `width` x `height`.
pub fn fill(
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    stroke_width: f64,
    orientation: Orientation,
    seed: u64,
) -> Result<Vec<Line>> {
    HatchFiller::new(orientation).fill(Rect::new(left, top, width, height), stroke_width, seed)
}

// Far from the origin a step can be smaller than the spacing between floats;
// a row that does not advance ends the pass.
fn horizontal_fill(
    bounds: &Rect,
    steps: &StepRange,
    max_pairs: usize,
    noise: &mut NoiseSource,
    lines: &mut Vec<Line>,
) {
    let left = bounds.left;
    let right = bounds.right();
    let bottom = bounds.bottom();
    let mut current_y = bounds.top;

    for _ in 0..max_pairs {
        if current_y > bottom {
            break;
        }
        let next_y_right = current_y + steps.next(noise);
        lines.push(Line::new(left, current_y, right, next_y_right));
        let next_y_left = next_y_right + steps.next(noise);
        lines.push(Line::new(right, next_y_right, left, next_y_left));
        if next_y_left <= current_y {
            break;
        }
        current_y = next_y_left;
    }
}

fn vertical_fill(
    bounds: &Rect,
    steps: &StepRange,
    max_pairs: usize,
    noise: &mut NoiseSource,
    lines: &mut Vec<Line>,
) {
    let top = bounds.top;
    let bottom = bounds.bottom();
    let right = bounds.right();
    let mut current_x = bounds.left;

    for _ in 0..max_pairs {
        if current_x > right {
            break;
        }
        let next_x_bottom = current_x + steps.next(noise);
        lines.push(Line::new(current_x, top, next_x_bottom, bottom));
        let next_x_top = next_x_bottom + steps.next(noise);
        lines.push(Line::new(next_x_bottom, bottom, next_x_top, top));
        if next_x_top <= current_x {
            break;
        }
        current_x = next_x_top;
    }
}

// ============================================================================
// TESTS
// ============================================================================
