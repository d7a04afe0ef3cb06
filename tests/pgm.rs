use lsd_detector::image::{pgm, Grid};
use lsd_detector::LsdError;
use std::path::PathBuf;

#[test]
fn round_trip_truncates_to_integers() {
    let data = vec![0.0, 12.7, 255.0, 99.99, 3.2, 128.5];
    let grid = Grid::from_vec(3, 2, data.clone()).unwrap();
    let decoded = pgm::decode(&pgm::encode(&grid)).unwrap();
    assert_eq!((decoded.w, decoded.h), (3, 2));
    assert_eq!(decoded.max_value, Some(255));
    let expected: Vec<f64> = data.iter().map(|v| v.trunc()).collect();
    assert_eq!(decoded.data, expected);
}

#[test]
fn max_value_metadata_is_preserved() {
    let grid = Grid::from_vec(2, 2, vec![0.0, 1.0, 2.0, 1023.0])
        .unwrap()
        .with_max_value(1023);
    let decoded = pgm::decode(&pgm::encode(&grid)).unwrap();
    assert_eq!(decoded.max_value, Some(1023));
    assert_eq!(decoded, grid);
}

#[test]
fn files_are_read_through_the_codec() {
    let path = std::env::temp_dir().join(format!("lsd-detector-{}.pgm", std::process::id()));
    std::fs::write(&path, "P2\n# written by a test\n2 2\n255\n0 255\n255 0\n").unwrap();
    let grid = pgm::read_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(grid.data, vec![0.0, 255.0, 255.0, 0.0]);

    let missing = PathBuf::from("/nonexistent/lsd-detector.pgm");
    assert!(matches!(pgm::read_file(&missing), Err(LsdError::Io(_))));
}
