use crate::error::{LsdError, Result};

/// Trait implemented by separable 1D filters applied by the sampler.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order).
    fn taps(&self) -> &[f64];
}

/// Sampled Gaussian `exp(-0.5 * ((i - mean) / sigma)^2)`, normalised to sum 1.
///
/// The sampler re-centres the kernel for every output row/column, so
/// [`GaussianKernel::update`] rewrites the taps in place.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f64>,
}

impl GaussianKernel {
    pub fn new(dimension: usize, sigma: f64, mean: f64) -> Result<Self> {
        if dimension == 0 {
            return Err(LsdError::invalid_argument("dimension", "must be positive"));
        }
        let mut kernel = Self {
            taps: vec![0.0; dimension],
        };
        kernel.update(sigma, mean)?;
        Ok(kernel)
    }

    /// Recompute the taps for a new `sigma` and sub-pixel `mean`.
    ///
    /// Normalisation is skipped when the raw sum is not positive.
    pub fn update(&mut self, sigma: f64, mean: f64) -> Result<()> {
        if sigma <= 0.0 {
            return Err(LsdError::invalid_argument("sigma", "must be positive"));
        }
        let mut sum = 0.0;
        for (i, tap) in self.taps.iter_mut().enumerate() {
            let v = (i as f64 - mean) / sigma;
            *tap = (-0.5 * v * v).exp();
            sum += *tap;
        }
        if sum > 0.0 {
            for tap in &mut self.taps {
                *tap /= sum;
            }
        }
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.taps.len()
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f64] {
        &self.taps
    }
}
