//! Level-line field: per-pixel gradient magnitude and orientation.
//!
//! - Gradients come from a 2×2 window, so the value at `(x, y)` describes the
//!   point `(x + 0.5, y + 0.5)`; the detector adds that offset to its output.
//! - Pixels at or below the magnitude threshold are treated as noise and get
//!   the `NOT_DEFINED` orientation.
//! - Seeds are visited strongest first through a bucketed ordering, which is
//!   linear in the pixel count instead of a full sort.

pub mod level_line;

pub use level_line::{level_line_field, LevelLineField};
