//! Parameters of the line segment detector.
//!
//! Defaults reproduce the classical parameter-free setting; none of them
//! should need tuning for ordinary photographs.

use crate::error::{LsdError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Detector knobs, deserialisable from partial JSON objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdParams {
    /// Resampling factor applied before detection (`1.0` disables it).
    pub scale: f64,
    /// Gaussian sigma is `sigma_scale / scale` when downscaling.
    pub sigma_scale: f64,
    /// Bound on the quantization error of the gradient.
    pub quant: f64,
    /// Angular tolerance in degrees, in `(0, 180)`.
    pub angle_threshold_deg: f64,
    /// Detection threshold on `-log10(NFA)`.
    pub log_eps: f64,
    /// Minimum fraction of a rectangle covered by its region.
    pub density_threshold: f64,
    /// Number of buckets of the gradient pseudo-ordering.
    pub n_bins: usize,
}

impl Default for LsdParams {
    fn default() -> Self {
        Self {
            scale: 0.8,
            sigma_scale: 0.6,
            quant: 2.0,
            angle_threshold_deg: 22.5,
            log_eps: 0.0,
            density_threshold: 0.7,
            n_bins: 1024,
        }
    }
}

impl LsdParams {
    /// Check every knob against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.scale.is_nan() || self.scale <= 0.0 {
            return Err(LsdError::invalid_argument("scale", "must be positive"));
        }
        if self.sigma_scale.is_nan() || self.sigma_scale <= 0.0 {
            return Err(LsdError::invalid_argument("sigma_scale", "must be positive"));
        }
        if self.quant.is_nan() || self.quant < 0.0 {
            return Err(LsdError::invalid_argument("quant", "must be non-negative"));
        }
        if !(self.angle_threshold_deg > 0.0 && self.angle_threshold_deg < 180.0) {
            return Err(LsdError::invalid_argument(
                "angle_threshold_deg",
                "must lie in (0, 180)",
            ));
        }
        if self.log_eps.is_nan() {
            return Err(LsdError::invalid_argument("log_eps", "must be a number"));
        }
        if !(0.0..=1.0).contains(&self.density_threshold) {
            return Err(LsdError::invalid_argument(
                "density_threshold",
                "must lie in [0, 1]",
            ));
        }
        if self.n_bins == 0 {
            return Err(LsdError::invalid_argument("n_bins", "must be positive"));
        }
        Ok(())
    }

    /// Angular tolerance in radians.
    #[inline]
    pub fn precision(&self) -> f64 {
        PI * self.angle_threshold_deg / 180.0
    }

    /// Probability that a random orientation is aligned within [`Self::precision`].
    #[inline]
    pub fn probability(&self) -> f64 {
        self.angle_threshold_deg / 180.0
    }

    /// Gradient magnitude below which orientations are considered noise.
    #[inline]
    pub fn gradient_threshold(&self) -> f64 {
        self.quant / self.precision().sin()
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sigma_scale(mut self, sigma_scale: f64) -> Self {
        self.sigma_scale = sigma_scale;
        self
    }

    pub fn with_angle_threshold(mut self, degrees: f64) -> Self {
        self.angle_threshold_deg = degrees;
        self
    }

    pub fn with_log_eps(mut self, log_eps: f64) -> Self {
        self.log_eps = log_eps;
        self
    }

    pub fn with_density_threshold(mut self, density_threshold: f64) -> Self {
        self.density_threshold = density_threshold;
        self
    }

    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }
}
