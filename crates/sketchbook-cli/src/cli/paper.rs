//! `paper` command: render a background sheet.

use anyhow::{Result, bail};
use serde_json::json;

use sketchbook::{GridPaper, Paper, SvgSurface, TornPaper};

use super::common::{Options, emit, parse_numbers};

/// Execute the paper command.
pub fn cmd_paper(args: &[String]) -> Result<()> {
    let (options, positionals) = Options::parse(args)?;
    if options.help || positionals.is_empty() {
        print_usage();
        return Ok(());
    }

    let numbers = parse_numbers(&positionals[1..], &["width", "height"])?;
    let (width, height) = (numbers[0], numbers[1]);
    let seed = options.resolve_seed();
    let mut surface = SvgSurface::new(width, height);

    let data = match positionals[0].to_ascii_lowercase().as_str() {
        "grid" => {
            let paper = GridPaper::default();
            paper.draw(&mut surface, width, height, seed)?;
            json!({ "kind": "grid", "lines": paper.lines(width, height)? })
        }
        "torn" => {
            let paper = TornPaper::new(GridPaper::default());
            paper.draw(&mut surface, width, height, seed)?;
            json!({
                "kind": "torn",
                "seed": seed,
                "tear": paper.tear_edge(width, seed)?,
                "outline": paper.outline(width, height, seed)?,
            })
        }
        other => {
            print_usage();
            bail!("unknown paper '{other}' (expected grid or torn)")
        }
    };

    emit(&options, &surface.finish(), &data)
}

fn print_usage() {
    eprintln!("sketchbook paper - Render a paper background");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sketchbook paper grid <width> <height> [OPTIONS]");
    eprintln!("    sketchbook paper torn <width> <height> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file, .svg or .png (default: stdout)");
    eprintln!("    --seed <n>             Seed for the torn edge");
    eprintln!("    --json                 Print the grid lines or tear as JSON");
}
