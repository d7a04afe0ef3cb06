//! 2×2 level-line field with a magnitude-ordered pixel list.
//!
//! For the window
//! ```text
//!   A B
//!   C D
//! ```
//! `com1 = D - A`, `com2 = B - C`, `gx = com1 + com2`, `gy = com1 - com2`,
//! magnitude `sqrt((gx² + gy²) / 4)` and level-line angle `atan2(gx, -gy)`.
//! The last row and column have no full window and carry [`NOT_DEFINED`].
//!
//! Pixels are then pseudo-sorted by magnitude with a `n_bins` bucket pass,
//! strongest bucket first; within a bucket pixels keep column-major scan order.
use crate::angle::NOT_DEFINED;
use crate::error::{LsdError, Result};
use crate::image::{Grid, ImageView, Pixel};

/// Orientation/magnitude grids plus the seed visiting order.
#[derive(Clone, Debug)]
pub struct LevelLineField {
    /// Level-line angle per pixel in `(-π, π]`, or `NOT_DEFINED`.
    pub angles: Grid<f64>,
    /// Gradient magnitude per pixel (zero on the last row/column).
    pub magnitude: Grid<f64>,
    /// Pixels with a defined 2×2 window, by descending magnitude bucket.
    pub ordered: Vec<Pixel>,
    /// Largest magnitude above the threshold (zero for flat images).
    pub max_magnitude: f64,
}

impl LevelLineField {
    pub fn width(&self) -> usize {
        self.angles.w
    }

    pub fn height(&self) -> usize {
        self.angles.h
    }
}

/// Compute the level-line field of `img`.
///
/// Pixels with magnitude `<= threshold` get the `NOT_DEFINED` orientation.
pub fn level_line_field(img: &Grid<f64>, threshold: f64, n_bins: usize) -> Result<LevelLineField> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(LsdError::invalid_argument("threshold", "must be non-negative"));
    }
    if n_bins == 0 {
        return Err(LsdError::invalid_argument("n_bins", "must be positive"));
    }

    let (w, h) = (img.width(), img.height());
    let mut angles = Grid::filled(w, h, NOT_DEFINED)?;
    let mut magnitude = Grid::<f64>::new(w, h)?;
    let mut max_magnitude = 0.0f64;

    for y in 0..h.saturating_sub(1) {
        let top = img.row(y);
        let bottom = img.row(y + 1);
        for x in 0..w - 1 {
            let com1 = bottom[x + 1] - top[x];
            let com2 = top[x + 1] - bottom[x];
            let gx = com1 + com2;
            let gy = com1 - com2;
            let norm = ((gx * gx + gy * gy) / 4.0).sqrt();
            magnitude.set(x, y, norm);
            if norm > threshold {
                angles.set(x, y, gx.atan2(-gy));
                max_magnitude = max_magnitude.max(norm);
            }
        }
    }

    let ordered = order_by_magnitude(&magnitude, max_magnitude, n_bins);
    Ok(LevelLineField {
        angles,
        magnitude,
        ordered,
        max_magnitude,
    })
}

/// Counting sort of the interior pixels into `n_bins` magnitude buckets.
fn order_by_magnitude(magnitude: &Grid<f64>, max_magnitude: f64, n_bins: usize) -> Vec<Pixel> {
    let (iw, ih) = (magnitude.w - 1, magnitude.h.saturating_sub(1));
    let bin_of = |norm: f64| -> usize {
        if max_magnitude <= 0.0 {
            return 0;
        }
        ((norm * n_bins as f64 / max_magnitude) as usize).min(n_bins - 1)
    };

    let mut counts = vec![0usize; n_bins];
    for x in 0..iw {
        for y in 0..ih {
            counts[bin_of(magnitude.get(x, y))] += 1;
        }
    }

    // strongest bucket first
    let mut offsets = vec![0usize; n_bins];
    let mut acc = 0;
    for bin in (0..n_bins).rev() {
        offsets[bin] = acc;
        acc += counts[bin];
    }

    let mut ordered = vec![Pixel::default(); acc];
    for x in 0..iw {
        for y in 0..ih {
            let bin = bin_of(magnitude.get(x, y));
            ordered[offsets[bin]] = Pixel::new(x, y);
            offsets[bin] += 1;
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn vertical_step_gives_vertical_level_lines() {
        // dark left half, bright right half
        let data = (0..36).map(|i| if i % 6 >= 3 { 100.0 } else { 0.0 }).collect();
        let img = Grid::from_vec(6, 6, data).unwrap();
        let field = level_line_field(&img, 1.0, 16).unwrap();

        // gx = 200 at the step, gy = 0 -> atan2(200, -0) = pi/2
        assert_relative_eq!(field.magnitude.get(2, 1), 100.0, epsilon = 1e-12);
        assert_relative_eq!(field.angles.get(2, 1), FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(field.angles.get(0, 0), NOT_DEFINED);
        assert_eq!(field.angles.get(5, 2), NOT_DEFINED);
        assert_eq!(field.angles.get(2, 5), NOT_DEFINED);
        assert_relative_eq!(field.max_magnitude, 100.0);
    }

    #[test]
    fn horizontal_step_orientation() {
        // bright top, dark bottom: gy < 0 -> atan2(0, +) = 0
        let data = (0..16).map(|i| if i / 4 < 2 { 50.0 } else { 0.0 }).collect();
        let img = Grid::from_vec(4, 4, data).unwrap();
        let field = level_line_field(&img, 0.0, 8).unwrap();
        assert_relative_eq!(field.angles.get(1, 1), 0.0, epsilon = 1e-12);

        let flipped = img.map(|v| 50.0 - v);
        let field = level_line_field(&flipped, 0.0, 8).unwrap();
        assert_relative_eq!(field.angles.get(1, 1).abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn ordered_list_is_descending_by_bucket() {
        let data = (0..64).map(|i| ((i % 8) * (i % 8) + (i / 8)) as f64).collect();
        let img = Grid::from_vec(8, 8, data).unwrap();
        let field = level_line_field(&img, 0.0, 1024).unwrap();
        assert_eq!(field.ordered.len(), 49);
        let bins: Vec<usize> = field
            .ordered
            .iter()
            .map(|&p| {
                ((field.magnitude.at(p) * 1024.0 / field.max_magnitude) as usize).min(1023)
            })
            .collect();
        assert!(bins.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn flat_image_has_no_orientation() {
        let img = Grid::filled(32, 32, 7.0).unwrap();
        let field = level_line_field(&img, 5.2, 1024).unwrap();
        assert!(field.angles.data.iter().all(|&a| a == NOT_DEFINED));
        assert_eq!(field.ordered.len(), 31 * 31);
        assert_eq!(field.max_magnitude, 0.0);
    }

    #[test]
    fn tiny_grids_do_not_index_out_of_range() {
        let two = Grid::from_vec(2, 2, vec![0.0, 10.0, 10.0, 0.0]).unwrap();
        let field = level_line_field(&two, 0.0, 4).unwrap();
        assert_eq!(field.ordered, vec![Pixel::new(0, 0)]);

        for (w, h) in [(1, 5), (5, 1), (1, 1)] {
            let img = Grid::filled(w, h, 3.0).unwrap();
            let field = level_line_field(&img, 0.0, 4).unwrap();
            assert!(field.ordered.is_empty());
            assert!(field.angles.data.iter().all(|&a| a == NOT_DEFINED));
        }
    }

    #[test]
    fn rejects_bad_arguments() {
        let img = Grid::filled(3, 3, 0.0).unwrap();
        assert!(level_line_field(&img, -1.0, 4).is_err());
        assert!(level_line_field(&img, 0.0, 0).is_err());
    }
}
