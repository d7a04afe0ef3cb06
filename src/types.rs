use serde::{Deserialize, Serialize};

/// Accepted line segment in input-image coordinates (pixel centres at `+0.5`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Width of the supporting rectangle.
    pub width: f64,
    /// Alignment probability the rectangle was validated with.
    pub p: f64,
    /// `-log10(NFA)`; larger is more significant.
    pub log_nfa: f64,
}

impl LineSegment {
    /// `(x1, y1, x2, y2, width, p, log_nfa)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64, f64, f64) {
        (
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            self.width,
            self.p,
            self.log_nfa,
        )
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [(self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5]
    }
}
