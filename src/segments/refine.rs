//! Density-driven refinement of a region and its rectangle.
//!
//! A rectangle whose region fills less than `density_threshold` of its area
//! is first regrown with a tighter angular tolerance estimated around the
//! seed, then shrunk around the seed until dense enough.
use super::rect::Rect;
use super::region::Region;
use crate::angle::signed_angle_difference;
use crate::error::Result;
use crate::image::Grid;

/// Radius multiplier applied at every shrinking step.
const RADIUS_DECAY: f64 = 0.75;

/// Refine `region`/`rect` until the point density reaches `density_threshold`.
///
/// Returns `Ok(false)` when the region collapses below two points; the points
/// it still holds stay marked in `used`.
pub fn refine(
    region: &mut Region<'_>,
    rect: &mut Rect,
    used: &mut Grid<bool>,
    density_threshold: f64,
) -> Result<bool> {
    if rect.density(region.len()) >= density_threshold {
        return Ok(true);
    }

    let angles = &region.field().angles;
    let seed = region.seed();
    let seed_angle = angles.at(seed);

    // angular spread of the points near the seed
    let (mut sum, mut sum_sq, mut n) = (0.0, 0.0, 0usize);
    for q in region.points() {
        if q.distance_to(seed.x as f64, seed.y as f64) < rect.width {
            let d = signed_angle_difference(angles.at(q), seed_angle);
            sum += d;
            sum_sq += d * d;
            n += 1;
        }
    }
    let mean = sum / n as f64;
    let variance = ((sum_sq - 2.0 * mean * sum) / n as f64 + mean * mean).max(0.0);
    let tau = 2.0 * variance.sqrt();

    region.regrow(used, tau);
    log::trace!(
        "refine seed=({}, {}) tau={tau:.4} regrown={}",
        seed.x,
        seed.y,
        region.len()
    );
    if region.len() < 2 {
        return Ok(false);
    }

    *rect = Rect::fit(region, rect.prec, rect.p)?;
    if rect.density(region.len()) < density_threshold {
        return reduce_radius(region, rect, used, density_threshold);
    }
    Ok(true)
}

/// Evict points far from the seed, shrinking the radius by [`RADIUS_DECAY`]
/// each round, until the density target is met.
pub fn reduce_radius(
    region: &mut Region<'_>,
    rect: &mut Rect,
    used: &mut Grid<bool>,
    density_threshold: f64,
) -> Result<bool> {
    let mut density = rect.density(region.len());
    if density >= density_threshold {
        return Ok(true);
    }

    let seed = region.seed();
    let (sx, sy) = (seed.x as f64, seed.y as f64);
    let to_p1 = (rect.p1.x - sx).hypot(rect.p1.y - sy);
    let to_p2 = (rect.p2.x - sx).hypot(rect.p2.y - sy);
    let mut radius = to_p1.max(to_p2);

    while density < density_threshold {
        radius *= RADIUS_DECAY;
        region.retain_within(sx, sy, radius, used);
        if region.len() < 2 {
            return Ok(false);
        }
        *rect = Rect::fit(region, rect.prec, rect.p)?;
        density = rect.density(region.len());
    }
    Ok(true)
}
