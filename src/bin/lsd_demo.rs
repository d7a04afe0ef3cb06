use lsd_detector::config::lsd_demo;
use lsd_detector::diagnostics::TimingBreakdown;
use lsd_detector::image::io::{load_grayscale, save_label_mask, write_json_file};
use lsd_detector::{LineSegment, LineSegmentDetector, LsdParams};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = lsd_demo::load_config(Path::new(&config_path))?;

    let img = load_grayscale(&config.input)?;
    let det = LineSegmentDetector::new(config.params.clone()).map_err(|e| e.to_string())?;
    let out = det.detect(&img).map_err(|e| e.to_string())?;

    let report = LsdDemoReport {
        width: img.w,
        height: img.h,
        params: config.params,
        timing: out.timing,
        segments: out.segments,
    };
    write_json_file(&config.output.segments_json, &report)?;
    println!(
        "Saved {} line segments to {}",
        report.segments.len(),
        config.output.segments_json.display()
    );

    if let Some(path) = &config.output.regions_image {
        save_label_mask(&out.regions, path)?;
        println!("Saved region mask to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: lsd_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LsdDemoReport {
    width: usize,
    height: usize,
    params: LsdParams,
    timing: TimingBreakdown,
    segments: Vec<LineSegment>,
}
