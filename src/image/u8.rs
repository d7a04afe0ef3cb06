use super::{Grid, ImageView};
use crate::error::Result;

/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Copy the view into a `Grid<f64>` keeping raw 0..=255 sample values.
    pub fn to_grid(&self) -> Result<Grid<f64>> {
        let mut data = Vec::with_capacity(self.w * self.h);
        for row in self.rows() {
            data.extend(row.iter().map(|&v| v as f64));
        }
        Ok(Grid::from_vec(self.w, self.h, data)?.with_max_value(u8::MAX as u32))
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
