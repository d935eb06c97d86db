//! Sketch recipes: declarative scenes of hand-drawn shapes.
//!
//! Recipes are YAML files listing shapes in drawing order. Each shape gives
//! its kind, the numbers that kind takes, an optional style and an optional
//! hatch fill.

use std::fs;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sketchbook::{
    DrawSurface, Filler, GridPaper, Orientation, Paint, Painter, Paper, Path, Point, Rect,
    SvgSurface, TornPaper,
};

use super::common::{Options, Tool, emit, resolve_seed};
use super::shape::ShapeKind;

/// A complete sketch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub canvas: Canvas,

    /// Base seed; shape `i` without its own seed uses `seed + i`.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Style applied to every shape unless overridden.
    #[serde(default)]
    pub defaults: ShapeStyle,

    /// Shapes, drawn first to last.
    pub shapes: Vec<Shape>,
}

/// Page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub paper: PaperKind,
}

fn default_background() -> String {
    "white".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperKind {
    #[default]
    Plain,
    Grid,
    Torn,
}

/// One shape in the sketch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default)]
    pub name: Option<String>,

    /// `line`, `rect`, `circle`, `arc` or `capsule`.
    pub kind: String,

    /// Numbers in the order `sketchbook shape <kind>` takes them.
    pub geometry: Vec<f64>,

    #[serde(default)]
    pub style: ShapeStyle,

    /// Hatch the inside of the shape.
    #[serde(default)]
    pub fill: Option<Orientation>,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Style properties for a shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub stroke_width: Option<f64>,

    /// 0.0 to 1.0
    #[serde(default)]
    pub opacity: Option<f64>,
}

impl ShapeStyle {
    /// Merge this style with defaults, preferring self's values.
    pub fn merge_with(&self, defaults: &ShapeStyle) -> ShapeStyle {
        ShapeStyle {
            color: self.color.clone().or_else(|| defaults.color.clone()),
            stroke_width: self.stroke_width.or(defaults.stroke_width),
            opacity: self.opacity.or(defaults.opacity),
        }
    }

    pub fn to_paint(&self) -> Paint {
        let fallback = Paint::default();
        Paint {
            color: self.color.clone().unwrap_or(fallback.color),
            stroke_width: self.stroke_width.unwrap_or(fallback.stroke_width),
            opacity: self.opacity.unwrap_or(fallback.opacity),
        }
    }
}

/// A traced shape, as reported by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedShape {
    pub name: String,
    pub kind: &'static str,
    pub seed: u64,
    pub path: Path,
}

/// Result of rendering a recipe.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedRecipe {
    pub name: String,
    pub seed: u64,
    pub shapes: Vec<RenderedShape>,
    #[serde(skip)]
    pub svg: String,
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("failed to read recipe file {path}"))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("failed to parse recipe YAML")
    }

    /// Draw every enabled shape, seeding each from `base_seed` unless it
    /// carries its own seed.
    pub fn render(&self, tool: &Tool, base_seed: u64) -> Result<RenderedRecipe> {
        let (width, height) = (self.canvas.width, self.canvas.height);
        let mut surface = match self.canvas.paper {
            PaperKind::Plain => SvgSurface::with_background(width, height, &self.canvas.background),
            PaperKind::Grid | PaperKind::Torn => SvgSurface::new(width, height),
        };
        let paper = GridPaper { background: self.canvas.background.clone(), ..GridPaper::default() };
        match self.canvas.paper {
            PaperKind::Plain => {}
            PaperKind::Grid => paper.draw(&mut surface, width, height, base_seed)?,
            PaperKind::Torn => TornPaper::new(paper).draw(&mut surface, width, height, base_seed)?,
        }

        let mut rendered = Vec::new();
        for (index, shape) in self.shapes.iter().enumerate() {
            let name = shape.name.clone().unwrap_or_else(|| format!("shape{index}"));
            if !shape.enabled {
                continue;
            }
            let Some(kind) = ShapeKind::from_name(&shape.kind) else {
                warn!(shape = %name, kind = %shape.kind, "unknown shape kind, skipping");
                continue;
            };

            let seed = shape.seed.unwrap_or_else(|| base_seed.wrapping_add(index as u64));
            let paint = shape.style.merge_with(&self.defaults).to_paint();
            let path = kind
                .trace(tool, &shape.geometry, seed)
                .with_context(|| format!("shape '{name}'"))?;

            if let Some(orientation) = shape.fill {
                hatch_shape(&mut surface, tool, kind, &shape.geometry, orientation, &paint, seed)
                    .with_context(|| format!("filling shape '{name}'"))?;
            }
            surface.draw_path(&path, &paint);
            debug!(shape = %name, kind = kind.name(), seed, commands = path.len(), "drew shape");

            rendered.push(RenderedShape { name, kind: kind.name(), seed, path });
        }

        Ok(RenderedRecipe {
            name: self.name.clone(),
            seed: base_seed,
            shapes: rendered,
            svg: surface.finish(),
        })
    }
}

/// Hatch the inside of a closed shape. Lines and arcs have no inside.
fn hatch_shape(
    surface: &mut dyn DrawSurface,
    tool: &Tool,
    kind: ShapeKind,
    geometry: &[f64],
    orientation: Orientation,
    paint: &Paint,
    seed: u64,
) -> Result<()> {
    let filler = Filler::new(*tool, orientation);
    match kind {
        ShapeKind::Rect => {
            let rect = Rect::new(geometry[0], geometry[1], geometry[2], geometry[3]);
            filler.draw_rect(surface, rect, paint, seed)?;
        }
        ShapeKind::Capsule => {
            let rect = Rect::new(geometry[0], geometry[1], geometry[2], geometry[3]);
            filler.draw_capsule(surface, rect, paint, seed)?;
        }
        ShapeKind::Circle => {
            filler.draw_circle(surface, Point::new(geometry[0], geometry[1]), geometry[2], paint, seed)?;
        }
        ShapeKind::Line | ShapeKind::Arc => {
            warn!(kind = kind.name(), "open shapes cannot be filled, drawing outline only");
        }
    }
    Ok(())
}

/// Execute the recipe command.
pub fn cmd_recipe(args: &[String]) -> Result<()> {
    if args.iter().any(|a| a == "--example") {
        print_example();
        return Ok(());
    }

    let (options, positionals) = Options::parse(args)?;
    if options.help || positionals.is_empty() {
        print_usage();
        return Ok(());
    }
    if positionals.len() > 1 {
        bail!("expected one recipe file, got {}", positionals.len());
    }

    let recipe = Recipe::load(&positionals[0])?;
    info!(
        recipe = %recipe.name,
        width = recipe.canvas.width,
        height = recipe.canvas.height,
        shapes = recipe.shapes.len(),
        "loaded recipe"
    );

    // --seed on the command line wins over the recipe's own seed.
    let base_seed = resolve_seed(options.seed.or(recipe.seed));
    let rendered = recipe.render(&options.tool(), base_seed)?;
    emit(&options, &rendered.svg, &rendered)
}

fn print_usage() {
    eprintln!("sketchbook recipe - Render a hand-drawn sketch from YAML");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sketchbook recipe <recipe.yaml> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file, .svg or .png (default: stdout)");
    eprintln!("    --seed <n>             Override the recipe's base seed");
    eprintln!("    --json                 Print the traced paths as JSON");
    eprintln!("    --exact                Ideal geometry, no jitter");
    eprintln!("    --example              Print an example recipe YAML");
    eprintln!("    -h, --help             Show this help");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("    sketchbook recipe doodle.yaml -o doodle.png");
}

/// Sample recipe printed by `recipe --example`.
pub const EXAMPLE_RECIPE: &str = r##"# Example sketchbook recipe
name: "Doodle"
description: "A few hand-drawn shapes on grid paper"

canvas:
  width: 400
  height: 300
  background: "#fdfdf8"
  paper: grid        # plain, grid or torn

seed: 42             # shape i uses seed + i unless it sets its own

defaults:
  color: "#333333"
  stroke_width: 2
  opacity: 1.0

shapes:
  - name: sun
    kind: circle
    geometry: [300, 80, 45]      # cx cy radius
    fill: both
    style:
      color: "#e07a1f"

  - name: house
    kind: rect
    geometry: [60, 140, 140, 110]   # x y width height
    fill: vertical

  - name: roof
    kind: line
    geometry: [60, 140, 70, -60]    # x y dx dy

  - name: roof_back
    kind: line
    geometry: [130, 80, 70, 60]

  - name: cloud
    kind: capsule
    geometry: [220, 170, 140, 40]
    style:
      color: "#5a7fa8"
      opacity: 0.8

  - name: smile
    kind: arc
    geometry: [300, 80, 25, 120, 240]   # cx cy radius start end
    seed: 7
"##;

fn print_example() {
    print!("{}", EXAMPLE_RECIPE);
}

// ============================================================================
// TESTS
// ============================================================================
