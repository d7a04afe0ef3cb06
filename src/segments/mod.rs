//! Region growing, rectangle approximation and a-contrario validation.
//!
//! The pieces used by the detector for every seed pixel:
//!
//! - [`Region::grow`]: 8-connected growth of pixels whose level-line angle is
//!   within `precision` of the running circular mean of the region.
//! - [`Rect::fit`]: magnitude-weighted principal-axis rectangle of a region.
//! - [`refine`] / [`reduce_radius`]: regrow with a data-driven tolerance, then
//!   shrink around the seed until the region fills enough of its rectangle.
//! - [`RectScan`]: enumerates the integer pixels covered by a rectangle.
//! - [`nfa`] / [`rect_nfa`]: `-log10` of the number of false alarms.
//! - [`improve`]: local search over precision, width and side offsets that
//!   keeps only strictly more significant rectangles.
//!
//! The used-mask is owned by the caller and passed explicitly to every
//! operation that marks or releases pixels.

mod improve;
mod nfa;
mod rect;
mod refine;
mod region;
mod scan;

pub use improve::improve;
pub use nfa::{log_gamma, nfa, rect_nfa};
pub use rect::Rect;
pub use refine::{reduce_radius, refine};
pub use region::{PointHandle, Region, RegionPoints};
pub use scan::RectScan;
