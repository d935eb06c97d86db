//! CLI command implementations.
//!
//! - `shape` - trace a single line, rectangle, circle, arc or capsule
//! - `hatch` - hatch-fill a box, optionally clipped to a traced outline
//! - `recipe` - render a YAML sketch of several shapes
//! - `paper` - render a grid or torn-paper background

pub mod common;
pub mod hatch;
pub mod paper;
pub mod recipe;
pub mod shape;

pub use hatch::cmd_hatch;
pub use paper::cmd_paper;
pub use recipe::cmd_recipe;
pub use shape::cmd_shape;
