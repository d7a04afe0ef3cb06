use super::kernel::{GaussianKernel, SeparableFilter};
use crate::error::{LsdError, Result};
use crate::image::{Grid, ImageView, ImageViewMut};

/// Kernel support in units of sigma: the Gaussian is cut where it drops below
/// `10^-PRECISION` of its peak.
const PRECISION: f64 = 3.0;

/// Resample `src` by `scale` with a Gaussian anti-aliasing filter.
///
/// Output is `ceil(w * scale) × ceil(h * scale)`. Sigma is `sigma_scale / scale`
/// when downscaling and `sigma_scale` otherwise. Two separable passes run
/// (columns into an intermediate `new_w × h` grid, then rows), with mirror
/// boundary handling.
pub fn gaussian_sampler(src: &Grid<f64>, scale: f64, sigma_scale: f64) -> Result<Grid<f64>> {
    if scale.is_nan() || scale <= 0.0 {
        return Err(LsdError::invalid_argument("scale", "must be positive"));
    }
    if sigma_scale.is_nan() || sigma_scale <= 0.0 {
        return Err(LsdError::invalid_argument("sigma_scale", "must be positive"));
    }
    let new_w = scaled_dimension(src.w, scale)?;
    let new_h = scaled_dimension(src.h, scale)?;

    let sigma = if scale < 1.0 {
        sigma_scale / scale
    } else {
        sigma_scale
    };
    let half = kernel_half_width(sigma)?;
    let dimension = half
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| {
            LsdError::invalid_argument("sigma_scale", format!("kernel half-width {half} overflows"))
        })?;
    let mut kernel = GaussianKernel::new(dimension, sigma, half as f64)?;

    // x axis
    let mut aux = Grid::<f64>::new(new_w, src.h)?;
    for x in 0..new_w {
        let xx = x as f64 / scale;
        let xc = (xx + 0.5).floor();
        kernel.update(sigma, half as f64 + xx - xc)?;
        let taps = kernel.taps();
        let origin = xc as isize - half as isize;
        for y in 0..src.h {
            let row = src.row(y);
            let sum: f64 = taps
                .iter()
                .enumerate()
                .map(|(i, &t)| row[mirror_index(origin + i as isize, src.w)] * t)
                .sum();
            aux.set(x, y, sum);
        }
    }

    // y axis
    let mut out = Grid::<f64>::new(new_w, new_h)?;
    for y in 0..new_h {
        let yy = y as f64 / scale;
        let yc = (yy + 0.5).floor();
        kernel.update(sigma, half as f64 + yy - yc)?;
        let taps = kernel.taps();
        let origin = yc as isize - half as isize;
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            *px = taps
                .iter()
                .enumerate()
                .map(|(i, &t)| aux.get(x, mirror_index(origin + i as isize, src.h)) * t)
                .sum();
        }
    }

    out.max_value = src.max_value;
    Ok(out)
}

fn scaled_dimension(dim: usize, scale: f64) -> Result<usize> {
    let scaled = (dim as f64 * scale).ceil();
    if !scaled.is_finite() || scaled > u32::MAX as f64 {
        return Err(LsdError::invalid_argument(
            "scale",
            format!("cannot scale dimension {dim} by {scale}"),
        ));
    }
    Ok(scaled as usize)
}

fn kernel_half_width(sigma: f64) -> Result<usize> {
    let half = (sigma * (2.0 * PRECISION * std::f64::consts::LN_10).sqrt()).ceil();
    if !half.is_finite() || half > u32::MAX as f64 {
        return Err(LsdError::invalid_argument(
            "sigma_scale",
            format!("Gaussian sigma {sigma} gives an unbounded kernel"),
        ));
    }
    Ok(half as usize)
}

/// Fold `idx` into `[0, dim)` by reflection (period `2 * dim`).
#[inline]
fn mirror_index(idx: isize, dim: usize) -> usize {
    let period = 2 * dim as isize;
    let j = idx.rem_euclid(period) as usize;
    if j >= dim {
        2 * dim - 1 - j
    } else {
        j
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(w: usize, h: usize) -> Grid<f64> {
        let data = (0..w * h).map(|i| ((i % w) * 10 + (i / w)) as f64).collect();
        Grid::from_vec(w, h, data).unwrap()
    }

    #[test]
    fn output_dimensions_round_up() {
        let img = ramp(37, 23);
        for &s in &[0.8, 0.5, 1.0, 1.7, 0.33] {
            let out = gaussian_sampler(&img, s, 0.6).unwrap();
            assert_eq!(out.w, (37.0 * s).ceil() as usize);
            assert_eq!(out.h, (23.0 * s).ceil() as usize);
        }
    }

    #[test]
    fn constant_image_is_preserved() {
        let img = Grid::filled(16, 9, 42.0).unwrap();
        for &s in &[1.0, 0.8, 2.0] {
            let out = gaussian_sampler(&img, s, 0.6).unwrap();
            for &v in &out.data {
                assert_relative_eq!(v, 42.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn unit_scale_blurs_rather_than_copies() {
        let mut img = Grid::filled(9, 9, 0.0).unwrap();
        img.set(4, 4, 100.0);
        let out = gaussian_sampler(&img, 1.0, 0.6).unwrap();
        assert!(out.get(4, 4) < 100.0);
        assert!(out.get(3, 4) > 0.0);
        assert_relative_eq!(out.data.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn mirror_index_reflects() {
        assert_eq!(mirror_index(-1, 5), 0);
        assert_eq!(mirror_index(-2, 5), 1);
        assert_eq!(mirror_index(5, 5), 4);
        assert_eq!(mirror_index(6, 5), 3);
        assert_eq!(mirror_index(10, 5), 0);
        assert_eq!(mirror_index(3, 5), 3);
    }

    #[test]
    fn rejects_bad_factors() {
        let img = ramp(4, 4);
        assert!(gaussian_sampler(&img, 0.0, 0.6).is_err());
        assert!(gaussian_sampler(&img, 0.5, -1.0).is_err());
        assert!(gaussian_sampler(&img, 1e300, 0.6).is_err());
    }

    #[test]
    fn huge_sigma_is_an_error_not_a_panic() {
        let img = Grid::filled(8, 8, 1.0).unwrap();
        for (scale, sigma_scale) in [(1e-300, 0.6), (1.0, 1e300), (1.0, f64::INFINITY)] {
            assert!(matches!(
                gaussian_sampler(&img, scale, sigma_scale),
                Err(LsdError::InvalidArgument { name: "sigma_scale", .. })
            ));
        }
        assert_eq!(kernel_half_width(0.75).unwrap(), 3);
    }
}
