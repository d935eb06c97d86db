//! Path command buffer.
//!
//! A [`Path`] is an ordered list of move/line/close commands. Generators
//! append into a caller-owned path, which is what lets a compound outline be
//! built from several calls: each call continues from the current point left
//! behind by the previous one.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A single drawing command. All points are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// An ordered, growable sequence of path commands.
///
/// Deserializing replays the command list, so the current point and
/// contour start pick up where the serialized path left off.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PathCommands")]
pub struct Path {
    commands: Vec<PathCommand>,
    /// Start of the current contour; where `close()` returns to.
    #[serde(skip)]
    contour_start: Point,
    #[serde(skip)]
    current: Point,
}

/// Serialized form of a [`Path`]: just its commands.
#[derive(Deserialize)]
struct PathCommands {
    commands: Vec<PathCommand>,
}

impl From<PathCommands> for Path {
    fn from(data: PathCommands) -> Self {
        let mut path = Path::new();
        for command in data.commands {
            match command {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::Close => path.close(),
            }
        }
        path
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path whose first command is a move to `point`.
    pub fn starting_at(point: Point) -> Self {
        let mut path = Self::new();
        path.move_to(point);
        path
    }

    /// True when no command has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Start a new contour at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
        self.contour_start = point;
        self.current = point;
    }

    /// Draw a straight segment from the current point to `point`.
    ///
    /// On an empty path the segment starts from the origin.
    pub fn line_to(&mut self, point: Point) {
        self.ensure_started();
        self.commands.push(PathCommand::LineTo(point));
        self.current = point;
    }

    /// Draw a straight segment by `(dx, dy)` relative to the current point.
    pub fn rel_line_to(&mut self, dx: f64, dy: f64) {
        let target = self.current.offset(dx, dy);
        self.line_to(target);
    }

    /// Close the current contour back to its starting point.
    ///
    /// Closing an empty path records nothing.
    pub fn close(&mut self) {
        if self.is_empty() {
            return;
        }
        self.commands.push(PathCommand::Close);
        self.current = self.contour_start;
    }

    /// The point the next command will continue from.
    #[inline]
    pub fn current_point(&self) -> Point {
        self.current
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Points visited by the path, in order.
    ///
    /// A `Close` contributes the contour start it returns to, so a closed
    /// shape ends on the point it started from.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.commands.len());
        let mut contour_start = Point::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    contour_start = p;
                    points.push(p);
                }
                PathCommand::LineTo(p) => points.push(p),
                PathCommand::Close => points.push(contour_start),
            }
        }
        points
    }

    /// First point of the path, if any.
    pub fn first_point(&self) -> Option<Point> {
        self.commands.first().map(|command| match *command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::Close => Point::ZERO,
        })
    }

    /// Last point drawn to, treating `Close` as a return to the contour start.
    pub fn last_point(&self) -> Option<Point> {
        if self.is_empty() { None } else { Some(self.current) }
    }

    /// True when the last command is a `Close`.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Iterate over the straight segments between consecutive points.
    ///
    /// Segments across a `MoveTo` are not included.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        let mut segments = Vec::with_capacity(self.commands.len());
        let mut contour_start = Point::ZERO;
        let mut cursor: Option<Point> = None;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    contour_start = p;
                    cursor = Some(p);
                }
                PathCommand::LineTo(p) => {
                    if let Some(from) = cursor {
                        segments.push((from, p));
                    }
                    cursor = Some(p);
                }
                PathCommand::Close => {
                    if let Some(from) = cursor {
                        segments.push((from, contour_start));
                    }
                    cursor = Some(contour_start);
                }
            }
        }
        segments
    }

    /// Render the commands as SVG path data (`d` attribute).
    pub fn to_svg_data(&self) -> String {
        let mut data = String::with_capacity(self.commands.len() * 16);
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                data.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo(p) => write!(data, "M{:.2},{:.2}", p.x, p.y),
                PathCommand::LineTo(p) => write!(data, "L{:.2},{:.2}", p.x, p.y),
                PathCommand::Close => write!(data, "Z"),
            };
        }
        data
    }

    fn ensure_started(&mut self) {
        if self.is_empty() {
            self.move_to(Point::ZERO);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
