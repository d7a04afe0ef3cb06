use crate::angle::{is_aligned, NOT_DEFINED};
use crate::error::{LsdError, Result};
use crate::gradient::LevelLineField;
use crate::image::{Grid, Pixel};

/// Stable handle to a point stored in [`RegionPoints`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointHandle(usize);

/// Ordered point storage with O(1) append and O(1) removal by handle.
///
/// Removed slots are tombstoned so handles of the remaining points stay valid
/// while a removal pass is iterating; [`RegionPoints::compact`] drops the
/// tombstones once the pass is over.
#[derive(Clone, Debug, Default)]
pub struct RegionPoints {
    slots: Vec<Option<Pixel>>,
    live: usize,
}

impl RegionPoints {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    pub fn push(&mut self, p: Pixel) -> PointHandle {
        self.slots.push(Some(p));
        self.live += 1;
        PointHandle(self.slots.len() - 1)
    }

    pub fn remove(&mut self, handle: PointHandle) -> Option<Pixel> {
        let removed = self.slots.get_mut(handle.0).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn get(&self, handle: PointHandle) -> Option<Pixel> {
        self.slots.get(handle.0).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Live points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    pub fn handles(&self) -> impl Iterator<Item = (PointHandle, Pixel)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|p| (PointHandle(i), p)))
    }

    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }
}

/// Connected set of pixels whose level-line angles agree within `precision`.
///
/// The region borrows the level-line field it was grown on; the used-mask is
/// owned by the caller and passed explicitly to every mutating operation.
#[derive(Clone, Debug)]
pub struct Region<'a> {
    field: &'a LevelLineField,
    points: RegionPoints,
    seed: Pixel,
    angle: f64,
    precision: f64,
}

impl<'a> Region<'a> {
    /// Grow a region from `seed`, marking every accepted pixel in `used`.
    ///
    /// Neighbours (full 3×3 window) join when they are inside the image, not
    /// yet used, and aligned with the *current* mean region angle, so the
    /// result depends on visiting order.
    pub fn grow(
        seed: Pixel,
        field: &'a LevelLineField,
        used: &mut Grid<bool>,
        precision: f64,
    ) -> Result<Self> {
        if seed.x >= field.width() || seed.y >= field.height() {
            return Err(LsdError::invalid_argument(
                "seed",
                format!(
                    "({}, {}) outside {}x{}",
                    seed.x,
                    seed.y,
                    field.width(),
                    field.height()
                ),
            ));
        }
        if !field.angles.same_size(used) {
            return Err(LsdError::invalid_argument(
                "used",
                "mask size differs from the level-line field",
            ));
        }
        if precision.is_nan() || precision < 0.0 {
            return Err(LsdError::invalid_argument("precision", "must be non-negative"));
        }
        let mut region = Self {
            field,
            points: RegionPoints::with_capacity(128),
            seed,
            angle: field.angles.at(seed),
            precision,
        };
        region.flood(used);
        Ok(region)
    }

    fn flood(&mut self, used: &mut Grid<bool>) {
        let field = self.field;
        let angles = &field.angles;
        self.points.clear();
        self.points.push(self.seed);
        used.set_at(self.seed, true);
        self.angle = angles.at(self.seed);
        let mut sum_dx = self.angle.cos();
        let mut sum_dy = self.angle.sin();

        // `slots` doubles as the FIFO worklist: nothing is removed while growing
        let mut next = 0;
        while let Some(p) = self.points.get(PointHandle(next)) {
            next += 1;
            for xx in p.x as isize - 1..=p.x as isize + 1 {
                for yy in p.y as isize - 1..=p.y as isize + 1 {
                    if !used.contains(xx, yy) {
                        continue;
                    }
                    let q = Pixel::new(xx as usize, yy as usize);
                    if used.at(q) || !is_aligned(angles.at(q), self.angle, self.precision) {
                        continue;
                    }
                    used.set_at(q, true);
                    self.points.push(q);
                    let a = angles.at(q);
                    sum_dx += a.cos();
                    sum_dy += a.sin();
                    self.angle = sum_dy.atan2(sum_dx);
                }
            }
        }
    }

    /// Release every point and grow again from the seed with a new precision.
    pub fn regrow(&mut self, used: &mut Grid<bool>, precision: f64) {
        self.release(used);
        self.precision = precision;
        self.flood(used);
    }

    /// Drop every point farther than `radius` from `(cx, cy)`, returning them to
    /// the pool of unused pixels.
    pub fn retain_within(&mut self, cx: f64, cy: f64, radius: f64, used: &mut Grid<bool>) {
        let evicted: Vec<PointHandle> = self
            .points
            .handles()
            .filter(|(_, p)| p.distance_to(cx, cy) > radius)
            .map(|(h, _)| h)
            .collect();
        for handle in evicted {
            if let Some(p) = self.points.remove(handle) {
                used.set_at(p, false);
            }
        }
        self.points.compact();
    }

    /// Mark every point of the region as unused.
    pub fn release(&self, used: &mut Grid<bool>) {
        for p in self.points.iter() {
            used.set_at(p, false);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn seed(&self) -> Pixel {
        self.seed
    }

    /// Circular mean of the member angles.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn field(&self) -> &'a LevelLineField {
        self.field
    }

    pub fn points(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.points.iter()
    }

    /// Whether the seed itself carries a defined orientation.
    pub fn has_defined_seed(&self) -> bool {
        self.field.angles.at(self.seed) != NOT_DEFINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_storage_removes_by_handle() {
        let mut pts = RegionPoints::with_capacity(4);
        let a = pts.push(Pixel::new(0, 0));
        let b = pts.push(Pixel::new(1, 0));
        let c = pts.push(Pixel::new(2, 0));
        assert_eq!(pts.remove(b), Some(Pixel::new(1, 0)));
        assert_eq!(pts.remove(b), None);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts.get(c), Some(Pixel::new(2, 0)));
        assert_eq!(pts.get(a), Some(Pixel::new(0, 0)));
        assert_eq!(
            pts.iter().collect::<Vec<_>>(),
            vec![Pixel::new(0, 0), Pixel::new(2, 0)]
        );
        pts.compact();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts.handles().count(), 2);
    }
}
