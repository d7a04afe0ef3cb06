//! I/O helpers for grayscale rasters and JSON.
//!
//! - `load_grayscale`: read a `.pgm` (plain P2) through the codec, anything
//!   else (PNG/JPEG/...) through `image`, as a `Grid<f64>` of raw samples.
//! - `save_label_mask`: write a segment label grid as an 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{pgm, Grid, ImageU8};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as raw grayscale samples.
pub fn load_grayscale(path: &Path) -> Result<Grid<f64>, String> {
    let is_pgm = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pgm"));
    if is_pgm {
        return pgm::read_file(path).map_err(|e| format!("{}: {e}", path.display()));
    }
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let view = ImageU8 {
        w,
        h,
        stride: w,
        data: img.as_raw(),
    };
    view.to_grid().map_err(|e| format!("{}: {e}", path.display()))
}

/// Save a label grid as a PNG: background black, every labelled pixel white.
pub fn save_label_mask(labels: &Grid<u32>, path: &Path) -> Result<(), String> {
    let out = label_mask(labels)?;
    ensure_parent_dir(path)?;
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn label_mask(labels: &Grid<u32>) -> Result<GrayImage, String> {
    let too_large = |_| format!("label grid {}x{} exceeds PNG dimensions", labels.w, labels.h);
    let width = u32::try_from(labels.w).map_err(too_large)?;
    let height = u32::try_from(labels.h).map_err(too_large)?;
    let mut out = GrayImage::new(width, height);
    for (px, &label) in out.pixels_mut().zip(&labels.data) {
        *px = Luma([if label > 0 { 255u8 } else { 0u8 }]);
    }
    Ok(out)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mask_marks_every_labelled_pixel() {
        let mut labels = Grid::<u32>::new(3, 2).unwrap();
        labels.set(2, 0, 1);
        labels.set(0, 1, 4);
        let mask = label_mask(&labels).unwrap();
        assert_eq!(mask.dimensions(), (3, 2));
        assert_eq!(mask.get_pixel(2, 0), &Luma([255]));
        assert_eq!(mask.get_pixel(0, 1), &Luma([255]));
        assert_eq!(mask.get_pixel(1, 0), &Luma([0]));
        assert_eq!(mask.pixels().filter(|p| p.0[0] == 255).count(), 2);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_label_grid_is_rejected() {
        let labels = Grid::<u32> {
            w: u32::MAX as usize + 1,
            h: 1,
            data: Vec::new(),
            max_value: None,
        };
        let err = label_mask(&labels).unwrap_err();
        assert!(err.contains("exceeds"), "{err}");
    }
}
