//! Common utilities shared across CLI commands.

use std::fs;

use anyhow::{Context, Result, bail};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use sketchbook::{
    Arc, ExactTool, GeometryTool, HandDrawnTool, NoiseSource, Orientation, Paint, Path, Point,
};

/// Options understood by every command.
#[derive(Debug, Clone)]
pub struct Options {
    pub output: Option<String>,
    pub seed: Option<u64>,
    pub json: bool,
    pub exact: bool,
    pub color: String,
    pub stroke_width: f64,
    pub orientation: Orientation,
    pub clip: Option<String>,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: None,
            seed: None,
            json: false,
            exact: false,
            color: "black".to_string(),
            stroke_width: 2.0,
            orientation: Orientation::Horizontal,
            clip: None,
            help: false,
        }
    }
}

impl Options {
    /// Split `args` into options and positional arguments.
    ///
    /// Negative numbers are positionals, not flags.
    pub fn parse(args: &[String]) -> Result<(Self, Vec<String>)> {
        let mut options = Self::default();
        let mut positionals = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "-o" | "--output" => options.output = Some(value(args, &mut i, arg)?.to_string()),
                "--seed" => {
                    let raw = value(args, &mut i, arg)?;
                    options.seed = Some(raw.parse().with_context(|| format!("invalid seed '{raw}'"))?);
                }
                "--json" => options.json = true,
                "--exact" => options.exact = true,
                "--color" => options.color = value(args, &mut i, arg)?.to_string(),
                "-w" | "--stroke-width" => {
                    let raw = value(args, &mut i, arg)?;
                    options.stroke_width =
                        raw.parse().with_context(|| format!("invalid stroke width '{raw}'"))?;
                }
                "--orientation" => {
                    let raw = value(args, &mut i, arg)?;
                    options.orientation = Orientation::from_name(raw)
                        .with_context(|| format!("unknown orientation '{raw}'"))?;
                }
                "--clip" => options.clip = Some(value(args, &mut i, arg)?.to_string()),
                "-v" | "--verbose" => {}
                "-h" | "--help" => options.help = true,
                _ if !arg.starts_with('-') || arg.parse::<f64>().is_ok() => positionals.push(arg.to_string()),
                _ => bail!("unknown option '{arg}'"),
            }
            i += 1;
        }

        Ok((options, positionals))
    }

    pub fn paint(&self) -> Paint {
        Paint::new(self.color.clone(), self.stroke_width)
    }

    pub fn tool(&self) -> Tool {
        if self.exact {
            Tool::Exact(ExactTool::default())
        } else {
            Tool::HandDrawn(HandDrawnTool::default())
        }
    }

    /// The `--seed` value, or a fresh random one that gets logged so the
    /// output can be reproduced.
    pub fn resolve_seed(&self) -> u64 {
        resolve_seed(self.seed)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{flag} needs a value"),
    }
}

pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::rng().random::<u64>();
            info!(seed, "no --seed given, using a random one");
            seed
        }
    }
}

/// Parse positional numbers, one per entry in `names`.
pub fn parse_numbers(values: &[String], names: &[&str]) -> Result<Vec<f64>> {
    if values.len() != names.len() {
        bail!("expected {} numbers ({}), got {}", names.len(), names.join(" "), values.len());
    }
    values
        .iter()
        .zip(names)
        .map(|(raw, name)| raw.parse::<f64>().with_context(|| format!("invalid {name} '{raw}'")))
        .collect()
}

/// The tool selected on the command line.
#[derive(Debug, Clone, Copy)]
pub enum Tool {
    HandDrawn(HandDrawnTool),
    Exact(ExactTool),
}

impl GeometryTool for Tool {
    fn trace_line(&self, path: &mut Path, dx: f64, dy: f64, noise: &mut NoiseSource) -> sketchbook::Result<()> {
        match self {
            Tool::HandDrawn(tool) => tool.trace_line(path, dx, dy, noise),
            Tool::Exact(tool) => tool.trace_line(path, dx, dy, noise),
        }
    }

    fn trace_arc(&self, path: &mut Path, arc: &Arc, noise: &mut NoiseSource) -> sketchbook::Result<()> {
        match self {
            Tool::HandDrawn(tool) => tool.trace_arc(path, arc, noise),
            Tool::Exact(tool) => tool.trace_arc(path, arc, noise),
        }
    }
}

/// Page size that fits every point plus a margin on the far sides.
pub fn page_extent(points: &[Point], margin: f64) -> (f64, f64) {
    let max_x = points.iter().map(|p| p.x).fold(0.0, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(0.0, f64::max);
    (max_x + margin, max_y + margin)
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Write the result: JSON with `--json`, PNG for a `.png` output path,
/// SVG otherwise. Without `-o` the text goes to stdout.
pub fn emit<T: Serialize + ?Sized>(options: &Options, svg: &str, data: &T) -> Result<()> {
    if options.json {
        let json = serde_json::to_string_pretty(data).context("failed to serialize JSON")?;
        return write_text(options.output.as_deref(), &json);
    }

    match options.output.as_deref() {
        Some(path) if is_png(path) => rasterize(svg, path),
        output => write_text(output, svg),
    }
}

fn is_png(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn write_text(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) if path != "-" => {
            fs::write(path, text).with_context(|| format!("failed to write {path}"))?;
            eprintln!("Wrote: {}", path);
        }
        _ => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Render SVG content to a PNG file using resvg.
pub fn rasterize(svg: &str, png_path: &str) -> Result<()> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).context("failed to parse generated SVG")?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .context("could not create pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("failed to write {png_path}"))?;
    eprintln!("Wrote: {} ({}x{})", png_path, size.width(), size.height());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
