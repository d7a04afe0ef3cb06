use lsd_detector::image::Grid;
use lsd_detector::{LineSegmentDetector, LsdParams};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo: a dark square on a bright background, so four edges to find
    let (w, h) = (128usize, 96usize);
    let data = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            if (32..96).contains(&x) && (24..72).contains(&y) {
                40.0
            } else {
                200.0
            }
        })
        .collect();
    let img = Grid::from_vec(w, h, data).map_err(|e| e.to_string())?;

    let det = LineSegmentDetector::new(LsdParams::default()).map_err(|e| e.to_string())?;
    let out = det.detect(&img).map_err(|e| e.to_string())?;
    for seg in &out.segments {
        println!(
            "({:7.2}, {:7.2}) -> ({:7.2}, {:7.2}) width={:.2} log_nfa={:.2}",
            seg.x1, seg.y1, seg.x2, seg.y2, seg.width, seg.log_nfa
        );
    }
    println!(
        "segments={} latency_ms={:.3}",
        out.segments.len(),
        out.timing.total_ms
    );
    Ok(())
}
