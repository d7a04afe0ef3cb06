//! Gaussian resampling used to bring the input to the working resolution.
//!
//! Downscaling before the gradient computation suppresses aliasing and the
//! staircase effect of pixelated edges. The filter is a sampled Gaussian whose
//! centre is re-phased for every output row/column, so the same
//! [`GaussianKernel`] storage is rewritten in place rather than reallocated.

pub mod kernel;
pub mod sampler;

pub use kernel::{GaussianKernel, SeparableFilter};
pub use sampler::gaussian_sampler;
