#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Pipeline stages – public for tools and tests, but considered internals.
pub mod angle;
pub mod gradient;
pub mod scaling;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{detect_segments, LineSegmentDetector, LsdOutput, LsdParams};
pub use crate::error::{LsdError, Result};
pub use crate::types::LineSegment;

// Run diagnostics returned with every detection.
pub use crate::diagnostics::TimingBreakdown;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lsd_detector::prelude::*;
///
/// # fn main() -> Result<(), LsdError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = LineSegmentDetector::new(LsdParams::default())?;
/// let out = det.detect(&img.to_grid()?)?;
/// for seg in &out.segments {
///     println!("{:?}", seg.as_tuple());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Grid, ImageU8};
    pub use crate::{LineSegment, LineSegmentDetector, LsdError, LsdOutput, LsdParams};
}
