//! Core geometry types for sketchbook.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` lets you print with `{:?}`
//! - `Clone` / `Copy` let small values be duplicated implicitly
//! - `PartialEq` lets you compare with `==`
//! - `Serialize` / `Deserialize` (from serde) turn the value into JSON or YAML

use serde::{Deserialize, Serialize};

/// A 2D point in drawing-surface coordinates.
///
/// The y axis grows downward, matching SVG and screen canvases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A single straight stroke from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// An axis-aligned box given by its top-left corner and size.
///
/// Width and height are not required to be positive. Negative sizes describe
/// a box that extends left/up from its corner and generators treat them as
/// degenerate input rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    /// Origin of the drawing surface.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// This point moved by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Point on a circle at `angle_degrees`, measured clockwise from straight up.
    ///
    /// Angle 0 is the top of the circle, 90 the right-hand side.
    #[inline]
    pub fn on_circle(center: Point, radius: f64, angle_degrees: f64) -> Point {
        let radians = angle_degrees.to_radians();
        Point::new(
            center.x + radians.sin() * radius,
            center.y - radians.cos() * radius,
        )
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Rect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Bounding box of a circle.
    #[inline]
    pub fn around_circle(center: Point, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
