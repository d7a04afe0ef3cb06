//! Line segment detector orchestrating the a-contrario pipeline.
//!
//! Overview
//! - Optionally resamples the input with a Gaussian anti-aliasing filter
//!   (`scale`, `sigma_scale`).
//! - Builds the level-line field and visits pixels by decreasing gradient
//!   magnitude.
//! - From every unused seed with a defined orientation, grows a region,
//!   fits a rectangle, refines it until dense enough and searches for the
//!   most significant nearby rectangle.
//! - Accepts rectangles whose `-log10(NFA)` exceeds `log_eps`, maps them back
//!   to input coordinates and stamps their region into a label image.
//!
//! Failures while evaluating one seed reject that seed only; they are logged
//! and the pass continues. Parameter and input validation errors abort before
//! any pixel is processed.
//!
//! Modules
//! - [`params`] – detector knobs and their derived quantities.

pub mod params;

pub use params::LsdParams;

use crate::angle::NOT_DEFINED;
use crate::diagnostics::TimingBreakdown;
use crate::error::{LsdError, Result};
use crate::gradient::{level_line_field, LevelLineField};
use crate::image::{Grid, Pixel};
use crate::scaling::gaussian_sampler;
use crate::segments::{improve, refine, Rect, Region};
use crate::types::LineSegment;
use log::{debug, warn};
use std::borrow::Cow;
use std::time::Instant;

/// Result of a detection run.
#[derive(Clone, Debug)]
pub struct LsdOutput {
    /// Accepted segments in acceptance order.
    pub segments: Vec<LineSegment>,
    /// Label image with the input's dimensions: `0` is background, otherwise
    /// the 1-based index of the segment the pixel supports.
    pub regions: Grid<u32>,
    pub timing: TimingBreakdown,
}

/// Line segment detector configured with a validated [`LsdParams`].
#[derive(Clone, Debug)]
pub struct LineSegmentDetector {
    params: LsdParams,
}

impl LineSegmentDetector {
    pub fn new(params: LsdParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &LsdParams {
        &self.params
    }

    /// Detect line segments in `img`.
    pub fn detect(&self, img: &Grid<f64>) -> Result<LsdOutput> {
        if img.w == 0 || img.h == 0 || img.data.len() != img.w * img.h {
            return Err(LsdError::invalid_argument(
                "image",
                format!("{}x{} grid with {} samples", img.w, img.h, img.data.len()),
            ));
        }
        let params = &self.params;
        let mut timing = TimingBreakdown::default();

        let start = Instant::now();
        let image = if params.scale != 1.0 {
            Cow::Owned(gaussian_sampler(img, params.scale, params.sigma_scale)?)
        } else {
            Cow::Borrowed(img)
        };
        timing.record("scale", start);

        let start = Instant::now();
        let field = level_line_field(&image, params.gradient_threshold(), params.n_bins)?;
        timing.record("level_lines", start);

        let start = Instant::now();
        let mut search = SegmentSearch::new(params, &field)?;
        debug!(
            "LineSegmentDetector::detect {}x{} -> {}x{} log_nt={:.3} min_region_size={}",
            img.w,
            img.h,
            field.width(),
            field.height(),
            search.log_nt,
            search.min_region_size
        );
        for &seed in &field.ordered {
            search.visit(seed);
        }
        debug!(
            "LineSegmentDetector::detect grew {} regions, accepted {} segments",
            search.regions_grown,
            search.segments.len()
        );
        let regions = labels_at_input_size(search.labels, img.w, img.h, params.scale)?;
        let segments = search.segments;
        timing.record("search", start);

        Ok(LsdOutput {
            segments,
            regions,
            timing,
        })
    }
}

/// Detect line segments in `img` with the default parameters.
pub fn detect_segments(img: &Grid<f64>) -> Result<LsdOutput> {
    LineSegmentDetector::new(LsdParams::default())?.detect(img)
}

/// Resample a label grid stamped at processing resolution back onto the
/// `w × h` input grid; input pixel `(x, y)` reads processed pixel
/// `(⌊x·scale⌋, ⌊y·scale⌋)`.
fn labels_at_input_size(labels: Grid<u32>, w: usize, h: usize, scale: f64) -> Result<Grid<u32>> {
    if labels.w == w && labels.h == h {
        return Ok(labels);
    }
    let mut out = Grid::new(w, h)?;
    for y in 0..h {
        let sy = ((y as f64 * scale) as usize).min(labels.h - 1);
        for x in 0..w {
            let sx = ((x as f64 * scale) as usize).min(labels.w - 1);
            out.set(x, y, labels.get(sx, sy));
        }
    }
    Ok(out)
}

/// Mutable state of the seed loop over one level-line field.
struct SegmentSearch<'a> {
    field: &'a LevelLineField,
    used: Grid<bool>,
    labels: Grid<u32>,
    segments: Vec<LineSegment>,
    precision: f64,
    probability: f64,
    log_nt: f64,
    log_eps: f64,
    density_threshold: f64,
    min_region_size: usize,
    scale: f64,
    regions_grown: usize,
}

impl<'a> SegmentSearch<'a> {
    fn new(params: &LsdParams, field: &'a LevelLineField) -> Result<Self> {
        let (w, h) = (field.width(), field.height());
        let probability = params.probability();
        // number of tests: rectangles with any two endpoints, width and precision
        let log_nt = 5.0 * ((w as f64).log10() + (h as f64).log10()) / 2.0 + 11f64.log10();
        let min_region_size = (-log_nt / probability.log10()) as usize;
        Ok(Self {
            field,
            used: Grid::new(w, h)?,
            labels: Grid::new(w, h)?,
            segments: Vec::new(),
            precision: params.precision(),
            probability,
            log_nt,
            log_eps: params.log_eps,
            density_threshold: params.density_threshold,
            min_region_size,
            scale: params.scale,
            regions_grown: 0,
        })
    }

    fn visit(&mut self, seed: Pixel) {
        if self.used.at(seed) || self.field.angles.at(seed) == NOT_DEFINED {
            return;
        }
        self.regions_grown += 1;
        match self.try_seed(seed) {
            Ok(Some(segment)) => self.segments.push(segment),
            Ok(None) => {}
            Err(err) => warn!("seed ({}, {}) rejected: {err}", seed.x, seed.y),
        }
    }

    /// Grow, fit, refine and validate the region of `seed`.
    ///
    /// Pixels of rejected regions stay marked as used.
    fn try_seed(&mut self, seed: Pixel) -> Result<Option<LineSegment>> {
        let field = self.field;
        let mut region = Region::grow(seed, field, &mut self.used, self.precision)?;
        if region.len() < self.min_region_size {
            return Ok(None);
        }

        let mut rect = Rect::fit(&region, self.precision, self.probability)?;
        if !refine(&mut region, &mut rect, &mut self.used, self.density_threshold)? {
            return Ok(None);
        }

        let log_nfa = improve(&mut rect, &field.angles, self.log_nt, self.log_eps)?;
        if log_nfa <= self.log_eps {
            return Ok(None);
        }

        let label = u32::try_from(self.segments.len() + 1)
            .map_err(|_| LsdError::InvalidOperation("segment label overflow"))?;
        for p in region.points() {
            self.labels.set_at(p, label);
        }
        Ok(Some(self.to_segment(&rect, log_nfa)))
    }

    /// Shift to pixel centres and undo the resampling.
    fn to_segment(&self, rect: &Rect, log_nfa: f64) -> LineSegment {
        let mut segment = LineSegment {
            x1: rect.p1.x + 0.5,
            y1: rect.p1.y + 0.5,
            x2: rect.p2.x + 0.5,
            y2: rect.p2.y + 0.5,
            width: rect.width,
            p: rect.p,
            log_nfa,
        };
        if self.scale != 1.0 {
            segment.x1 /= self.scale;
            segment.y1 /= self.scale;
            segment.x2 /= self.scale;
            segment.y2 /= self.scale;
            segment.width /= self.scale;
        }
        segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(w: usize, h: usize, split_x: usize) -> Grid<f64> {
        let data = (0..w * h)
            .map(|i| if i % w < split_x { 0.0 } else { 255.0 })
            .collect();
        Grid::from_vec(w, h, data).unwrap()
    }

    #[test]
    fn finds_a_vertical_edge() {
        let img = step_image(32, 32, 16);
        let det = LineSegmentDetector::new(LsdParams::default().with_scale(1.0)).unwrap();
        let out = det.detect(&img).unwrap();
        assert_eq!(out.segments.len(), 1, "{:?}", out.segments);
        let seg = out.segments[0];
        // the step lies between columns 15 and 16
        assert!((seg.x1 - 16.0).abs() < 1.0 && (seg.x2 - 16.0).abs() < 1.0, "{seg:?}");
        assert!(seg.length() > 20.0, "{seg:?}");
        assert!(seg.log_nfa > 0.0);
        assert!(out.regions.data.iter().any(|&l| l == 1));
        assert!(out.regions.data.iter().all(|&l| l <= 1));
    }

    #[test]
    fn stages_are_timed() {
        let img = step_image(16, 16, 8);
        let out = detect_segments(&img).unwrap();
        for stage in ["scale", "level_lines", "search"] {
            assert!(out.timing.stage(stage).is_some(), "missing {stage}");
        }
        assert_eq!((out.regions.w, out.regions.h), (16, 16));
    }

    #[test]
    fn labels_are_mapped_back_to_input_pixels() {
        let mut labels = Grid::<u32>::new(4, 3).unwrap();
        labels.set(3, 2, 7);
        labels.set(1, 0, 2);
        let up = labels_at_input_size(labels, 8, 6, 0.5).unwrap();
        assert_eq!((up.w, up.h), (8, 6));
        for (x, y) in [(6, 4), (7, 4), (6, 5), (7, 5)] {
            assert_eq!(up.get(x, y), 7);
        }
        for (x, y) in [(2, 0), (3, 0), (2, 1), (3, 1)] {
            assert_eq!(up.get(x, y), 2);
        }
        assert_eq!(up.data.iter().filter(|&&l| l != 0).count(), 8);

        // upscaled processing grid
        let mut fine = Grid::<u32>::new(10, 10).unwrap();
        fine.set(9, 9, 1);
        let down = labels_at_input_size(fine, 5, 5, 2.0).unwrap();
        assert_eq!((down.w, down.h), (5, 5));
        assert!(down.data.iter().all(|&l| l == 0));
    }

    #[test]
    fn invalid_parameters_abort_early() {
        assert!(LineSegmentDetector::new(LsdParams::default().with_density_threshold(2.0)).is_err());
        let det = LineSegmentDetector::new(LsdParams::default()).unwrap();
        let broken = Grid {
            w: 4,
            h: 4,
            data: vec![0.0; 3],
            max_value: None,
        };
        assert!(det.detect(&broken).is_err());
    }
}
