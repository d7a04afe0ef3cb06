use super::region::Region;
use crate::angle::{absolute_angle_difference, double_equal};
use crate::error::{LsdError, Result};
use nalgebra::{Matrix2, SymmetricEigen, Vector2};
use std::f64::consts::PI;

/// Oriented rectangle summarising a region.
///
/// `p1`/`p2` are the endpoints of the central axis, `dir` is the unit vector
/// `(cos theta, sin theta)`, `prec` the alignment tolerance in radians and `p`
/// the probability that a random pixel is aligned within `prec`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
    pub width: f64,
    pub center: Vector2<f64>,
    pub theta: f64,
    pub dir: Vector2<f64>,
    pub prec: f64,
    pub p: f64,
}

impl Rect {
    /// Fit the magnitude-weighted principal-axis rectangle of `region`.
    ///
    /// The axis is the eigenvector of the smallest eigenvalue of the inertia
    /// matrix, flipped by π when it points away from the region orientation.
    pub fn fit(region: &Region<'_>, prec: f64, p: f64) -> Result<Self> {
        if region.is_empty() {
            return Err(LsdError::invalid_argument("region", "must not be empty"));
        }
        let magnitude = &region.field().magnitude;

        let mut sum = 0.0;
        let mut center = Vector2::<f64>::zeros();
        for q in region.points() {
            let weight = magnitude.at(q);
            center += Vector2::new(q.x as f64, q.y as f64) * weight;
            sum += weight;
        }
        if sum <= 0.0 {
            return Err(LsdError::InvalidOperation("region weights sum to zero"));
        }
        center /= sum;

        let theta = principal_angle(region, &center, prec)?;
        let dir = Vector2::new(theta.cos(), theta.sin());

        let (mut l_min, mut l_max, mut w_min, mut w_max) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for q in region.points() {
            let d = Vector2::new(q.x as f64, q.y as f64) - center;
            let l = d.dot(&dir);
            let w = -d.x * dir.y + d.y * dir.x;
            l_min = l_min.min(l);
            l_max = l_max.max(l);
            w_min = w_min.min(w);
            w_max = w_max.max(w);
        }

        Ok(Self {
            p1: center + dir * l_min,
            p2: center + dir * l_max,
            width: (w_max - w_min).max(1.0),
            center,
            theta,
            dir,
            prec,
            p,
        })
    }

    /// Distance between the two endpoints.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    /// Region points per unit of rectangle area.
    #[inline]
    pub fn density(&self, points: usize) -> f64 {
        points as f64 / (self.length() * self.width)
    }

    /// Move both long sides by `offset` along the normal `(-dy, dx)` and
    /// narrow the rectangle by `shrink`.
    pub(crate) fn shift_sides(&mut self, offset: f64, shrink: f64) {
        let normal = Vector2::new(-self.dir.y, self.dir.x);
        self.p1 += normal * offset;
        self.p2 += normal * offset;
        self.width -= shrink;
    }

    pub(crate) fn set_probability(&mut self, p: f64) {
        self.p = p;
        self.prec = p * PI;
    }
}

fn principal_angle(region: &Region<'_>, center: &Vector2<f64>, prec: f64) -> Result<f64> {
    let magnitude = &region.field().magnitude;
    let (mut ixx, mut iyy, mut ixy) = (0.0, 0.0, 0.0);
    for q in region.points() {
        let weight = magnitude.at(q);
        let dx = q.x as f64 - center.x;
        let dy = q.y as f64 - center.y;
        ixx += dy * dy * weight;
        iyy += dx * dx * weight;
        ixy -= dx * dy * weight;
    }
    if double_equal(ixx, 0.0) && double_equal(iyy, 0.0) && double_equal(ixy, 0.0) {
        return Err(LsdError::InvalidOperation("null inertia matrix"));
    }

    let eig = SymmetricEigen::new(Matrix2::new(ixx, ixy, ixy, iyy));
    let axis = if eig.eigenvalues[0] <= eig.eigenvalues[1] {
        eig.eigenvectors.column(0)
    } else {
        eig.eigenvectors.column(1)
    };
    let mut theta = axis[1].atan2(axis[0]);
    if absolute_angle_difference(theta, region.angle()) > prec {
        theta += PI;
    }
    Ok(theta)
}
