//! Plain-text PGM (`P2`) codec.
//!
//! Header: format tag, width, height and maximum sample value, followed by
//! whitespace-separated integer samples in row-major order. Lines containing
//! `#` are treated as comments and skipped entirely.
use super::Grid;
use crate::error::{LsdError, Result};

const MAGIC: &str = "P2";
const DEFAULT_MAX_VALUE: u32 = 255;

/// Decode a `P2` byte stream into a grid carrying the header's `maxval`.
pub fn decode(bytes: &[u8]) -> Result<Grid<f64>> {
    let text =
        std::str::from_utf8(bytes).map_err(|e| LsdError::Decode(format!("not UTF-8: {e}")))?;
    let mut tokens = text
        .lines()
        .filter(|line| !line.contains('#'))
        .flat_map(str::split_whitespace);

    let magic = tokens
        .next()
        .ok_or_else(|| LsdError::Decode("empty input".to_string()))?;
    if magic != MAGIC {
        return Err(LsdError::Decode(format!(
            "unsupported format tag {magic:?}, expected {MAGIC}"
        )));
    }
    let width = parse_header(tokens.next(), "width")?;
    let height = parse_header(tokens.next(), "height")?;
    let max_value = parse_header(tokens.next(), "max value")?;

    let expected = width
        .checked_mul(height)
        .ok_or_else(|| LsdError::Decode(format!("{width}x{height} overflows")))?;
    let mut data = Vec::with_capacity(expected);
    for token in tokens {
        let v: i64 = token
            .parse()
            .map_err(|e| LsdError::Decode(format!("bad sample {token:?}: {e}")))?;
        data.push(v as f64);
    }
    if data.len() != expected {
        return Err(LsdError::Decode(format!(
            "expected {expected} samples, found {}",
            data.len()
        )));
    }
    let max_value = u32::try_from(max_value)
        .map_err(|_| LsdError::Decode(format!("max value {max_value} out of range")))?;
    Ok(Grid::from_vec(width, height, data)?.with_max_value(max_value))
}

/// Read and decode a `P2` file.
pub fn read_file(path: &std::path::Path) -> Result<Grid<f64>> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode a grid as `P2`, truncating samples to integers.
pub fn encode(grid: &Grid<f64>) -> Vec<u8> {
    let max_value = grid.max_value.unwrap_or(DEFAULT_MAX_VALUE);
    let mut out = format!("{MAGIC}\n{} {}\n{max_value}\n", grid.w, grid.h);
    for row in grid.data.chunks(grid.w) {
        let line: Vec<String> = row.iter().map(|&v| (v.trunc() as i64).to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out.into_bytes()
}

fn parse_header(token: Option<&str>, field: &str) -> Result<usize> {
    let token = token.ok_or_else(|| LsdError::Decode(format!("missing {field}")))?;
    token
        .parse()
        .map_err(|e| LsdError::Decode(format!("bad {field} {token:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_header_comments_and_samples() {
        let text = "P2\n# a comment\n3 2\n15\n0 1 2\n3 4 15\n";
        let grid = decode(text.as_bytes()).unwrap();
        assert_eq!((grid.w, grid.h), (3, 2));
        assert_eq!(grid.max_value, Some(15));
        assert_eq!(grid.get(2, 1), 15.0);
    }

    #[test]
    fn rejects_other_formats_and_short_payloads() {
        assert!(matches!(decode(b"P5\n1 1\n255\n0"), Err(LsdError::Decode(_))));
        assert!(matches!(decode(b"P2\n2 2\n255\n0 1 2"), Err(LsdError::Decode(_))));
        assert!(matches!(decode(b""), Err(LsdError::Decode(_))));
    }

    #[test]
    fn encode_truncates_and_defaults_max_value() {
        let grid = Grid::from_vec(2, 1, vec![1.9, 254.2]).unwrap();
        let text = String::from_utf8(encode(&grid)).unwrap();
        assert_eq!(text, "P2\n2 1\n255\n1 254\n");
    }
}
