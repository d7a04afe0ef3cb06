use lsd_detector::image::Grid;

/// Sharp diagonal edge: pixels above the main diagonal (`y < x`) are 255, the
/// rest 0.
pub fn diagonal_edge(size: usize) -> Grid<f64> {
    assert!(size > 0, "image size must be positive");
    let data = (0..size * size)
        .map(|i| if i / size < i % size { 255.0 } else { 0.0 })
        .collect();
    Grid::from_vec(size, size, data).unwrap()
}

/// Constant image.
pub fn uniform(width: usize, height: usize, value: f64) -> Grid<f64> {
    Grid::filled(width, height, value).unwrap()
}

/// Dark axis-aligned rectangle `[x0, x1) × [y0, y1)` on a bright background.
pub fn dark_box(width: usize, height: usize, x: (usize, usize), y: (usize, usize)) -> Grid<f64> {
    let data = (0..width * height)
        .map(|i| {
            let (px, py) = (i % width, i / width);
            if (x.0..x.1).contains(&px) && (y.0..y.1).contains(&py) {
                40.0
            } else {
                200.0
            }
        })
        .collect();
    Grid::from_vec(width, height, data).unwrap()
}
