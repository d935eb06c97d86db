//! sketchbook - hand-drawn geometry from the command line
//!
//! Usage:
//!   sketchbook shape <kind> <numbers...>   Trace a single shape
//!   sketchbook hatch <width> <height>      Hatch-fill a box
//!   sketchbook recipe <recipe.yaml>        Render a YAML sketch
//!   sketchbook paper <grid|torn> <w> <h>   Render a paper background
//!
//! SVG (or JSON with `--json`) goes to stdout unless `-o` names a file.
//! Logs go to stderr.

mod cli;

use std::env;

use anyhow::Result;

use cli::{cmd_hatch, cmd_paper, cmd_recipe, cmd_shape};

fn main() {
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");

    if let Err(e) = init_logging(verbose) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let prog = args.first().map(String::as_str).unwrap_or("sketchbook");
    let Some(command) = args.get(1) else {
        print_usage(prog);
        return Ok(());
    };

    match command.as_str() {
        "shape" => cmd_shape(&args[2..]),
        "hatch" => cmd_hatch(&args[2..]),
        "recipe" => cmd_recipe(&args[2..]),
        "paper" => cmd_paper(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            Ok(())
        }
        other => {
            print_usage(prog);
            anyhow::bail!("unknown command '{other}'")
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `--verbose`.
fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn print_usage(prog: &str) {
    eprintln!("sketchbook - hand-drawn geometry generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} shape line <x> <y> <dx> <dy> [options]", prog);
    eprintln!("  {} shape rect <x> <y> <width> <height> [options]", prog);
    eprintln!("  {} shape circle <cx> <cy> <radius> [options]", prog);
    eprintln!("  {} shape arc <cx> <cy> <radius> <start> <end> [options]", prog);
    eprintln!("  {} shape capsule <x> <y> <width> <height> [options]", prog);
    eprintln!("  {} hatch <width> <height> [options]", prog);
    eprintln!("  {} recipe <recipe.yaml> [options]", prog);
    eprintln!("  {} recipe --example", prog);
    eprintln!("  {} paper <grid|torn> <width> <height> [options]", prog);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>       Output file: .svg or .png (default: stdout, SVG)");
    eprintln!("  --seed <n>                Seed for reproducible output (default: random)");
    eprintln!("  --json                    Emit geometry as JSON instead of SVG");
    eprintln!("  --exact                   Ideal geometry, no hand-drawn jitter");
    eprintln!("  --color <color>           Stroke color (default: black)");
    eprintln!("  --stroke-width <n>        Stroke width, also the hatch spacing (default: 2)");
    eprintln!("  --orientation <o>         Hatch direction: horizontal, vertical, both");
    eprintln!("  --clip <rect|circle>      Hatch only: clip the fill to a traced outline");
    eprintln!("  -v, --verbose             Debug logging on stderr (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Angles are in degrees, clockwise from 12 o'clock.");
}
