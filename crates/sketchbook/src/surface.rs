//! Draw surfaces: where generated paths and strokes end up.
//!
//! [`DrawSurface`] is the small set of capabilities painters need: stroke a
//! path, stroke a line, and a save/clip/restore stack for confining hatch
//! fills to a silhouette. [`SvgSurface`] records everything into an SVG
//! document.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, SketchError};
use crate::geometry::Line;
use crate::path::Path;

/// Stroke style for paths and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Any SVG color string.
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_color() -> String {
    "black".to_string()
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: default_color(),
            stroke_width: default_stroke_width(),
            opacity: default_opacity(),
        }
    }
}

impl Paint {
    pub fn new(color: impl Into<String>, stroke_width: f64) -> Self {
        Self { color: color.into(), stroke_width, ..Self::default() }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Rendering target for painters.
pub trait DrawSurface {
    /// Stroke `path` with `paint`.
    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Stroke a single line with `paint`.
    fn draw_line(&mut self, line: Line, paint: &Paint);

    /// Fill `path` with a solid color (no stroke).
    fn fill_path(&mut self, path: &Path, color: &str);

    /// Push the current clip state.
    fn save(&mut self);

    /// Intersect the current clip with the inside of `path`.
    fn clip_path(&mut self, path: &Path);

    /// Pop back to the clip state of the matching [`save`](Self::save).
    fn restore(&mut self) -> Result<()>;
}

// ============================================================================
// SVG
// ============================================================================

/// Records drawing into an SVG document.
///
/// Clips become `<clipPath>` definitions referenced by nested `<g>` groups;
/// `restore` closes the groups opened since its `save`.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    defs: String,
    body: String,
    /// Open clip groups at each `save`.
    saved: Vec<usize>,
    open_groups: usize,
    next_clip_id: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            saved: Vec::new(),
            open_groups: 0,
            next_clip_id: 0,
        }
    }

    /// Surface whose first element is a full-size background rectangle.
    pub fn with_background(width: f64, height: f64, color: &str) -> Self {
        let mut surface = Self::new(width, height);
        let _ = writeln!(surface.body, r#"  <rect width="100%" height="100%" fill="{color}"/>"#);
        surface
    }

    /// Number of `save` calls not yet restored.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Close any open groups and return the SVG document.
    pub fn finish(mut self) -> String {
        self.close_groups(0);
        self.saved.clear();

        let mut svg = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">
"#,
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("  </defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn indent(&self) -> String {
        "  ".repeat(self.open_groups + 1)
    }

    fn close_groups(&mut self, keep: usize) {
        while self.open_groups > keep {
            self.open_groups -= 1;
            let indent = self.indent();
            let _ = writeln!(self.body, "{indent}</g>");
        }
    }
}

fn stroke_attributes(paint: &Paint) -> String {
    let mut attributes = format!(
        r#"fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
        paint.color, paint.stroke_width
    );
    if paint.opacity < 1.0 {
        let _ = write!(attributes, r#" stroke-opacity="{}""#, paint.opacity);
    }
    attributes
}

impl DrawSurface for SvgSurface {
    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let indent = self.indent();
        let _ = writeln!(
            self.body,
            r#"{indent}<path d="{}" {}/>"#,
            path.to_svg_data(),
            stroke_attributes(paint)
        );
    }

    fn draw_line(&mut self, line: Line, paint: &Paint) {
        let indent = self.indent();
        let _ = writeln!(
            self.body,
            r#"{indent}<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            stroke_attributes(paint)
        );
    }

    fn fill_path(&mut self, path: &Path, color: &str) {
        if path.is_empty() {
            return;
        }
        let indent = self.indent();
        let _ = writeln!(self.body, r#"{indent}<path d="{}" fill="{color}"/>"#, path.to_svg_data());
    }

    fn save(&mut self) {
        self.saved.push(self.open_groups);
    }

    fn clip_path(&mut self, path: &Path) {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        let _ = writeln!(
            self.defs,
            r#"    <clipPath id="{id}"><path d="{}"/></clipPath>"#,
            path.to_svg_data()
        );
        let indent = self.indent();
        let _ = writeln!(self.body, r#"{indent}<g clip-path="url(#{id})">"#);
        self.open_groups += 1;
        trace!(id = %id, depth = self.open_groups, "clip");
    }

    fn restore(&mut self) -> Result<()> {
        let keep = self.saved.pop().ok_or(SketchError::UnbalancedRestore)?;
        self.close_groups(keep);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn triangle() -> Path {
        let mut path = Path::starting_at(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(5.0, 8.0));
        path.close();
        path
    }

    #[test]
    fn empty_surface_is_a_valid_document() {
        let svg = SvgSurface::new(100.0, 50.0).finish();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100.00 50.00""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn paths_and_lines_are_stroked() {
        let mut surface = SvgSurface::with_background(20.0, 20.0, "white");
        surface.draw_path(&triangle(), &Paint::new("#333", 2.0));
        surface.draw_line(Line::new(0.0, 0.0, 5.0, 5.0), &Paint::default().with_opacity(0.5));
        let svg = surface.finish();

        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(r#"d="M0.00,0.00 L10.00,0.00 L5.00,8.00 Z""#));
        assert!(svg.contains(r##"stroke="#333" stroke-width="2""##));
        assert!(svg.contains(r#"<line x1="0.00" y1="0.00" x2="5.00" y2="5.00""#));
        assert!(svg.contains(r#"stroke-opacity="0.5""#));
    }

    #[test]
    fn empty_path_draws_nothing() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.draw_path(&Path::new(), &Paint::default());
        assert!(!surface.finish().contains("<path"));
    }

    #[test]
    fn clips_nest_and_restore() {
        let mut surface = SvgSurface::new(20.0, 20.0);
        surface.save();
        surface.clip_path(&triangle());
        surface.save();
        surface.clip_path(&triangle());
        surface.draw_line(Line::new(0.0, 0.0, 10.0, 10.0), &Paint::default());
        assert_eq!(surface.save_depth(), 2);
        surface.restore().unwrap();
        surface.draw_line(Line::new(1.0, 1.0, 2.0, 2.0), &Paint::default());
        surface.restore().unwrap();
        assert_eq!(surface.save_depth(), 0);
        let svg = surface.finish();

        assert!(svg.contains(r#"<clipPath id="clip0">"#));
        assert!(svg.contains(r#"<clipPath id="clip1">"#));
        assert_eq!(svg.matches("<g clip-path").count(), 2);
        assert_eq!(svg.matches("</g>").count(), 2);

        // The second line sits inside the first clip group only.
        let second_line = svg.find(r#"x1="1.00""#).unwrap();
        let first_close = svg.find("</g>").unwrap();
        assert!(first_close < second_line);
    }

    #[test]
    fn unbalanced_restore_is_an_error() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        assert_eq!(surface.restore(), Err(SketchError::UnbalancedRestore));
    }

    #[test]
    fn finish_closes_dangling_groups() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.save();
        surface.clip_path(&triangle());
        let svg = surface.finish();
        assert_eq!(svg.matches("<g clip-path").count(), svg.matches("</g>").count());
    }

    #[test]
    fn paint_deserializes_with_defaults() {
        let paint: Paint = serde_json::from_str(r#"{"stroke_width": 3.0}"#).unwrap();
        assert_eq!(paint.color, "black");
        assert_eq!(paint.stroke_width, 3.0);
        assert_eq!(paint.opacity, 1.0);
    }
}
