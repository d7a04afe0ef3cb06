//! Run diagnostics attached to the detector output.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};
