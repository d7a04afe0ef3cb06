//! Pixel scan of an oriented rectangle.
//!
//! Corners are ordered circularly starting from the leftmost one. Columns are
//! swept left to right; in each column the covered rows run from the lower
//! boundary (edges 0→3→2) up to the upper boundary (edges 0→1→2), both taken
//! at the column's integer `x`.
use super::rect::Rect;
use crate::angle::double_equal;

/// Lazy, restartable sequence of the integer pixels covered by a rectangle.
///
/// Coordinates may fall outside the image; callers filter them.
#[derive(Clone, Debug)]
pub struct RectScan {
    vx: [f64; 4],
    vy: [f64; 4],
    x: isize,
    y: isize,
    ys: f64,
    ye: f64,
}

impl RectScan {
    pub fn new(rect: &Rect) -> Self {
        let (dx, dy) = (rect.dir.x, rect.dir.y);
        let half = rect.width / 2.0;
        let (x1, y1, x2, y2) = (rect.p1.x, rect.p1.y, rect.p2.x, rect.p2.y);
        let corners_x = [x1 - dy * half, x2 - dy * half, x2 + dy * half, x1 + dy * half];
        let corners_y = [y1 + dx * half, y2 + dx * half, y2 - dx * half, y1 - dx * half];

        let offset = if x1 < x2 && y1 <= y2 {
            0
        } else if x1 >= x2 && y1 < y2 {
            1
        } else if x1 > x2 && y1 >= y2 {
            2
        } else {
            3
        };
        let vx: [f64; 4] = std::array::from_fn(|i| corners_x[(offset + i) % 4]);
        let vy: [f64; 4] = std::array::from_fn(|i| corners_y[(offset + i) % 4]);

        let mut scan = Self {
            vx,
            vy,
            x: vx[0].ceil() as isize - 1,
            y: vy[0].ceil() as isize,
            ys: -f64::MAX,
            ye: -f64::MAX,
        };
        scan.advance();
        scan
    }

    /// The sweep has passed the rightmost corner.
    #[inline]
    pub fn is_done(&self) -> bool {
        !(self.x as f64 <= self.vx[2])
    }

    /// Current pixel, or `None` once the sweep is over.
    #[inline]
    pub fn current(&self) -> Option<(isize, isize)> {
        (!self.is_done()).then_some((self.x, self.y))
    }

    /// Move to the next covered pixel.
    pub fn advance(&mut self) {
        if !self.is_done() {
            self.y += 1;
        }
        // NaN bounds count as an exhausted column
        while !(self.y as f64 <= self.ye) && !self.is_done() {
            self.x += 1;
            if self.is_done() {
                return;
            }
            let x = self.x as f64;
            let [vx0, vx1, vx2, vx3] = self.vx;
            let [vy0, vy1, vy2, vy3] = self.vy;

            self.ys = if x < vx3 {
                interp_low(x, vx0, vy0, vx3, vy3)
            } else {
                interp_low(x, vx3, vy3, vx2, vy2)
            };
            self.ye = if x < vx1 {
                interp_high(x, vx0, vy0, vx1, vy1)
            } else {
                interp_high(x, vx1, vy1, vx2, vy2)
            };
            self.y = self.ys.ceil() as isize;
        }
    }
}

impl Iterator for RectScan {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current()?;
        self.advance();
        Some(current)
    }
}

/// `y` on the segment `(x1,y1)-(x2,y2)` at `x`; the lower end for vertical edges.
#[inline]
fn interp_low(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if double_equal(x1, x2) {
        return y1.min(y2);
    }
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

/// `y` on the segment `(x1,y1)-(x2,y2)` at `x`; the upper end for vertical edges.
#[inline]
fn interp_high(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if double_equal(x1, x2) {
        return y1.max(y2);
    }
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use std::collections::HashSet;
    use std::f64::consts::FRAC_PI_4;

    fn rect(p1: (f64, f64), p2: (f64, f64), width: f64) -> Rect {
        let d = Vector2::new(p2.0 - p1.0, p2.1 - p1.1);
        let dir = d.normalize();
        Rect {
            p1: Vector2::new(p1.0, p1.1),
            p2: Vector2::new(p2.0, p2.1),
            width,
            center: Vector2::new((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0),
            theta: dir.y.atan2(dir.x),
            dir,
            prec: FRAC_PI_4,
            p: 0.25,
        }
    }

    #[test]
    fn axis_aligned_rectangle_covers_its_grid_points() {
        // corners at x in {1, 5}, y in {1, 3}
        let r = rect((1.0, 2.0), (5.0, 2.0), 2.0);
        let pixels: HashSet<_> = RectScan::new(&r).collect();
        let expected: HashSet<_> = (1..=5).flat_map(|x| (1..=3).map(move |y| (x, y))).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn scan_is_restartable() {
        let r = rect((2.3, 1.1), (9.7, 6.4), 2.5);
        let scan = RectScan::new(&r);
        let first: Vec<_> = scan.clone().collect();
        let second: Vec<_> = scan.collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        let again: Vec<_> = RectScan::new(&r).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn orientation_does_not_change_coverage() {
        let forward = rect((2.3, 1.1), (9.7, 6.4), 2.5);
        let backward = rect((9.7, 6.4), (2.3, 1.1), 2.5);
        let a: HashSet<_> = RectScan::new(&forward).collect();
        let b: HashSet<_> = RectScan::new(&backward).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn every_pixel_is_visited_once() {
        let r = rect((0.0, 0.0), (12.0, 12.0), 3.0);
        let pixels: Vec<_> = RectScan::new(&r).collect();
        let unique: HashSet<_> = pixels.iter().copied().collect();
        assert_eq!(pixels.len(), unique.len());
        // area 12√2 × 3 ≈ 50.9
        assert!((35..=70).contains(&pixels.len()), "{}", pixels.len());
    }

    #[test]
    fn degenerate_rectangle_terminates() {
        let mut r = rect((0.0, 0.0), (4.0, 0.0), 1.0);
        r.dir = Vector2::new(f64::NAN, f64::NAN);
        assert_eq!(RectScan::new(&r).count(), 0);
    }
}
