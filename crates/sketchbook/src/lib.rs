//! # sketchbook
//!
//! Hand-drawn geometry generation: lines, rectangles, circles, arcs and
//! capsules traced as short jittered segments, plus zig-zag hatch fills.
//!
//! Every generator takes an explicit `u64` seed. The same inputs and seed
//! always produce the same path, so a sketch can be re-rendered exactly.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are declared, never discovered:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! The re-exports below are the crate's everyday API; the modules stay
//! public for the lower-level pieces (noise, segmenter constants).

pub mod error;
pub mod geometry;
pub mod hatch;
pub mod noise;
pub mod painter;
pub mod paper;
pub mod path;
pub mod segment;
pub mod surface;
pub mod tool;

// Re-export common types at crate root for convenience.
pub use error::{Result, SketchError};
pub use geometry::{Line, Point, Rect};
pub use hatch::{HatchFiller, Orientation};
pub use noise::NoiseSource;
pub use painter::{Filler, Painter, Tracer};
pub use paper::{GridPaper, MAX_PAGE_SIZE, Paper, TornPaper};
pub use path::{Path, PathCommand};
pub use segment::{Arc, MAX_SEGMENTS, SEGMENT_LENGTH, Segmenter};
pub use surface::{DrawSurface, Paint, SvgSurface};
pub use tool::{ExactTool, GeometryTool, HandDrawnTool};
