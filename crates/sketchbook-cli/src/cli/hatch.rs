//! `hatch` command: hand-drawn hatching of a box, optionally clipped.

use anyhow::{Result, bail};
use tracing::debug;

use sketchbook::{
    DrawSurface, Filler, HatchFiller, Line, Paint, Painter, Point, Rect, SvgSurface, Tracer,
};

use super::common::{Options, emit, parse_numbers};

/// Outline a hatch fill can be clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipShape {
    Rect,
    Circle,
}

impl ClipShape {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Some(ClipShape::Rect),
            "circle" => Some(ClipShape::Circle),
            _ => None,
        }
    }
}

/// Execute the hatch command.
pub fn cmd_hatch(args: &[String]) -> Result<()> {
    let (options, positionals) = Options::parse(args)?;
    if options.help || positionals.is_empty() {
        print_usage();
        return Ok(());
    }

    let numbers = parse_numbers(&positionals, &["width", "height"])?;
    let (width, height) = (numbers[0], numbers[1]);
    let clip = match options.clip.as_deref() {
        None => None,
        Some(name) => match ClipShape::from_name(name) {
            Some(shape) => Some(shape),
            None => bail!("unknown clip shape '{name}' (expected rect or circle)"),
        },
    };

    let seed = options.resolve_seed();
    let paint = options.paint();
    let margin = options.stroke_width * 2.0;
    let page = Rect::new(margin, margin, width, height);

    let mut surface = SvgSurface::new(width + margin * 2.0, height + margin * 2.0);
    let hatcher = HatchFiller::new(options.orientation);
    // Clipped fills are drawn by the painters, which hatch the outline's
    // bounds with the same seed; filling those bounds again gives the
    // stroke set that was drawn.
    let (bounds, lines) = match clip {
        None => (page, draw_unclipped(&mut surface, &hatcher, page, &paint, seed)?),
        Some(ClipShape::Rect) => {
            let filler = Filler::new(options.tool(), options.orientation);
            filler.draw_rect(&mut surface, page, &paint, seed)?;
            Tracer::new(options.tool()).draw_rect(&mut surface, page, &paint, seed)?;
            (page, hatcher.fill(page, paint.stroke_width, seed)?)
        }
        Some(ClipShape::Circle) => {
            let center = page.center();
            let radius = width.min(height) / 2.0;
            let filler = Filler::new(options.tool(), options.orientation);
            filler.draw_circle(&mut surface, center, radius, &paint, seed)?;
            Tracer::new(options.tool()).draw_circle(&mut surface, center, radius, &paint, seed)?;
            let bounds = Rect::around_circle(center, radius);
            (bounds, hatcher.fill(bounds, paint.stroke_width, seed)?)
        }
    };

    debug!(
        orientation = options.orientation.name(),
        strokes = lines.len(),
        origin = ?Point::new(bounds.left, bounds.top),
        "hatch command"
    );
    emit(&options, &surface.finish(), &lines)
}

/// Hatch `page` straight onto the surface and return the strokes drawn.
fn draw_unclipped(
    surface: &mut dyn DrawSurface,
    hatcher: &HatchFiller,
    page: Rect,
    paint: &Paint,
    seed: u64,
) -> Result<Vec<Line>> {
    let lines = hatcher.fill(page, paint.stroke_width, seed)?;
    for line in &lines {
        surface.draw_line(*line, paint);
    }
    Ok(lines)
}

fn print_usage() {
    eprintln!("sketchbook hatch - Hand-drawn hatch fill");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sketchbook hatch <width> <height> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --orientation <o>      horizontal, vertical or both (default: horizontal)");
    eprintln!("    --stroke-width <n>     Stroke width; also sets the row spacing (default: 2)");
    eprintln!("    --clip <rect|circle>   Clip the hatching to a traced outline");
    eprintln!("    --color <color>        Stroke color (default: black)");
    eprintln!("    -o, --output <file>    Output file, .svg or .png (default: stdout)");
    eprintln!("    --seed <n>             Seed for reproducible output");
    eprintln!("    --json                 Print the hatch strokes as JSON");
    eprintln!("    --exact                Ideal clip outline, no jitter");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("    sketchbook hatch 200 120 --orientation both --clip circle -o hatch.png");
}
