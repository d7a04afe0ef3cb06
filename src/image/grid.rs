//! Owned dense 2D grid in row-major layout.
//!
//! Used for every raster in the pipeline: input samples and the rescaled
//! image (`Grid<f64>`), level-line orientations and magnitudes, the shared
//! used-mask (`Grid<bool>`) and the output label image (`Grid<u32>`).
use crate::error::{LsdError, Result};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between pixel centres.
    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x as f64 - x;
        let dy = self.y as f64 - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Dense `w × h` grid; `data.len() == w * h` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
    /// Optional maximum sample value (e.g. the PGM `maxval` header).
    pub max_value: Option<u32>,
}

impl<T: Copy + Default> Grid<T> {
    /// Construct a default-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Result<Self> {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Construct a grid with every cell set to `value`.
    pub fn filled(w: usize, h: usize, value: T) -> Result<Self> {
        let len = checked_len(w, h)?;
        Ok(Self {
            w,
            h,
            data: vec![value; len],
            max_value: None,
        })
    }

    /// Wrap existing row-major samples.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Result<Self> {
        let len = checked_len(w, h)?;
        if data.len() != len {
            return Err(LsdError::invalid_argument(
                "data",
                format!("expected {len} samples for {w}x{h}, got {}", data.len()),
            ));
        }
        Ok(Self {
            w,
            h,
            data,
            max_value: None,
        })
    }

    pub fn with_max_value(mut self, max_value: u32) -> Self {
        self.max_value = Some(max_value);
        self
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
    #[inline]
    pub fn at(&self, p: Pixel) -> T {
        self.get(p.x, p.y)
    }
    #[inline]
    pub fn set_at(&mut self, p: Pixel, v: T) {
        self.set(p.x, p.y, v);
    }

    /// Whether signed coordinates fall inside the grid.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    /// Same-size grid with every cell transformed by `f`.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| f(v)).collect(),
            max_value: self.max_value,
        }
    }

    pub fn same_size<U>(&self, other: &Grid<U>) -> bool {
        self.w == other.w && self.h == other.h
    }
}

fn checked_len(w: usize, h: usize) -> Result<usize> {
    if w == 0 {
        return Err(LsdError::invalid_argument("width", "must be positive"));
    }
    if h == 0 {
        return Err(LsdError::invalid_argument("height", "must be positive"));
    }
    w.checked_mul(h)
        .ok_or_else(|| LsdError::invalid_argument("dimensions", format!("{w}x{h} overflows")))
}

impl<T: Copy> crate::image::traits::ImageView for Grid<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl<T: Copy> crate::image::traits::ImageViewMut for Grid<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
