//! `shape` command: trace a single shape.

use anyhow::{Result, bail};
use tracing::debug;

use sketchbook::{DrawSurface, GeometryTool, Path, Point, SvgSurface};

use super::common::{Options, Tool, emit, page_extent, parse_numbers};

/// Shapes the command can trace, with their positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rect,
    Circle,
    Arc,
    Capsule,
}

impl ShapeKind {
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Line, ShapeKind::Rect, ShapeKind::Circle, ShapeKind::Arc, ShapeKind::Capsule]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Arc => "arc",
            ShapeKind::Capsule => "capsule",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "line" => Some(ShapeKind::Line),
            "rect" | "rectangle" => Some(ShapeKind::Rect),
            "circle" => Some(ShapeKind::Circle),
            "arc" => Some(ShapeKind::Arc),
            "capsule" | "stadium" => Some(ShapeKind::Capsule),
            _ => None,
        }
    }

    /// Names of the numbers this shape takes, in order.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Line => &["x", "y", "dx", "dy"],
            ShapeKind::Rect | ShapeKind::Capsule => &["x", "y", "width", "height"],
            ShapeKind::Circle => &["cx", "cy", "radius"],
            ShapeKind::Arc => &["cx", "cy", "radius", "start", "end"],
        }
    }

    /// Build the path for `numbers`, which must match [`parameters`](Self::parameters).
    pub fn trace<G: GeometryTool>(&self, tool: &G, numbers: &[f64], seed: u64) -> Result<Path> {
        if numbers.len() != self.parameters().len() {
            bail!(
                "{} takes {} numbers ({}), got {}",
                self.name(),
                self.parameters().len(),
                self.parameters().join(" "),
                numbers.len()
            );
        }

        let path = match *self {
            ShapeKind::Line => {
                let start = Path::starting_at(Point::new(numbers[0], numbers[1]));
                tool.line_path(numbers[2], numbers[3], seed, Some(start))?
            }
            ShapeKind::Rect => tool.rectangle_path(numbers[0], numbers[1], numbers[2], numbers[3], seed)?,
            ShapeKind::Circle => tool.circle_path(numbers[0], numbers[1], numbers[2], seed)?,
            ShapeKind::Arc => {
                tool.arc_path(numbers[0], numbers[1], numbers[2], numbers[3], numbers[4], seed, None)?
            }
            ShapeKind::Capsule => tool.capsule_path(numbers[0], numbers[1], numbers[2], numbers[3], seed)?,
        };
        Ok(path)
    }
}

/// Execute the shape command.
pub fn cmd_shape(args: &[String]) -> Result<()> {
    let (options, positionals) = Options::parse(args)?;
    if options.help || positionals.is_empty() {
        print_usage();
        return Ok(());
    }

    let Some(kind) = ShapeKind::from_name(&positionals[0]) else {
        print_usage();
        bail!("unknown shape '{}'", positionals[0]);
    };
    let numbers = parse_numbers(&positionals[1..], kind.parameters())?;
    let seed = options.resolve_seed();
    let tool: Tool = options.tool();

    let path = kind.trace(&tool, &numbers, seed)?;
    debug!(shape = kind.name(), seed, commands = path.len(), "traced shape");

    let (width, height) = page_extent(&path.points(), 16.0 + options.stroke_width);
    let mut surface = SvgSurface::new(width, height);
    surface.draw_path(&path, &options.paint());
    emit(&options, &surface.finish(), &path)
}

fn print_usage() {
    eprintln!("sketchbook shape - Trace a hand-drawn shape");
    eprintln!();
    eprintln!("USAGE:");
    for kind in ShapeKind::all() {
        let params: Vec<String> = kind.parameters().iter().map(|p| format!("<{p}>")).collect();
        eprintln!("    sketchbook shape {} {} [OPTIONS]", kind.name(), params.join(" "));
    }
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file, .svg or .png (default: stdout)");
    eprintln!("    --seed <n>             Seed for reproducible output");
    eprintln!("    --json                 Print the path commands as JSON");
    eprintln!("    --exact                Ideal geometry, no jitter");
    eprintln!("    --color <color>        Stroke color (default: black)");
    eprintln!("    --stroke-width <n>     Stroke width (default: 2)");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("    sketchbook shape circle 100 100 80 --seed 7 -o circle.png");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sketchbook::{ExactTool, HandDrawnTool};

    #[test]
    fn names_round_trip() {
        for kind in ShapeKind::all() {
            assert_eq!(ShapeKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(ShapeKind::from_name("Rectangle"), Some(ShapeKind::Rect));
        assert_eq!(ShapeKind::from_name("hexagon"), None);
    }

    #[test]
    fn line_starts_at_given_point() {
        let path = ShapeKind::Line
            .trace(&HandDrawnTool::default(), &[10.0, 20.0, 100.0, 0.0], 3)
            .unwrap();
        assert_eq!(path.first_point(), Some(Point::new(10.0, 20.0)));
        assert!(path.current_point().distance(Point::new(110.0, 20.0)) < 1e-9);
    }

    #[test]
    fn exact_arc_ends_on_the_circle() {
        let path = ShapeKind::Arc
            .trace(&ExactTool::default(), &[50.0, 50.0, 20.0, 0.0, 90.0], 0)
            .unwrap();
        assert!(path.current_point().distance(Point::new(70.0, 50.0)) < 1e-9);
    }

    #[test]
    fn wrong_number_count_is_an_error() {
        assert!(ShapeKind::Circle.trace(&ExactTool::default(), &[1.0, 2.0], 0).is_err());
    }
}
