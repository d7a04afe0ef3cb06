//! Number of false alarms of a rectangle under the a-contrario noise model.
//!
//! `NFA = NT · P[X ≥ k]` with `X ~ Binomial(n, p)`; everything is handled in
//! base-10 logarithms and the returned value is `-log10(NFA)`, so larger means
//! more significant.
use super::rect::Rect;
use super::scan::RectScan;
use crate::angle::{double_equal, is_aligned};
use crate::error::{LsdError, Result};
use crate::image::{Grid, Pixel};
use std::f64::consts::LN_10;

/// Relative error tolerated when truncating the binomial tail.
const TAIL_TOLERANCE: f64 = 0.1;

const LANCZOS_Q: [f64; 7] = [
    75122.6331530,
    80916.6278952,
    36308.2951477,
    8687.24529705,
    1168.92649479,
    83.8676043424,
    2.50662827511,
];

/// Natural logarithm of the gamma function.
///
/// Lanczos approximation up to `x = 15`, Windschitl's formula above.
pub fn log_gamma(x: f64) -> f64 {
    if x > 15.0 {
        log_gamma_windschitl(x)
    } else {
        log_gamma_lanczos(x)
    }
}

fn log_gamma_lanczos(x: f64) -> f64 {
    let mut a = (x + 0.5) * (x + 5.5).ln() - (x + 5.5);
    let mut b = 0.0;
    let mut xn = 1.0;
    for (n, q) in LANCZOS_Q.iter().enumerate() {
        a -= (x + n as f64).ln();
        b += q * xn;
        xn *= x;
    }
    a + b.ln()
}

fn log_gamma_windschitl(x: f64) -> f64 {
    0.918938533204673
        + (x - 0.5) * x.ln()
        - x
        + 0.5 * x * (x * (1.0 / x).sinh() + 1.0 / (810.0 * x.powi(6))).ln()
}

/// `-log10(NFA)` for `k` aligned points out of `n` with alignment probability `p`.
///
/// `log_nt` is `log10` of the number of tests.
pub fn nfa(n: usize, k: usize, p: f64, log_nt: f64) -> Result<f64> {
    if k > n {
        return Err(LsdError::invalid_argument(
            "k",
            format!("aligned count {k} exceeds point count {n}"),
        ));
    }
    if p.is_nan() || p <= 0.0 || p >= 1.1 {
        return Err(LsdError::invalid_argument(
            "p",
            format!("probability {p} outside (0, 1.1)"),
        ));
    }

    if n == 0 || k == 0 {
        return Ok(-log_nt);
    }
    if n == k {
        return Ok(-log_nt - n as f64 * p.log10());
    }

    let (nf, kf) = (n as f64, k as f64);
    let p_term = p / (1.0 - p);

    // first term of the tail, P[X = k]
    let log1term = log_gamma(nf + 1.0) - log_gamma(kf + 1.0) - log_gamma(nf - kf + 1.0)
        + kf * p.ln()
        + (nf - kf) * (1.0 - p).ln();
    let mut term = log1term.exp();

    if double_equal(term, 0.0) {
        // underflow: bound the tail by its first term when k is above the mean
        return Ok(if kf > nf * p {
            -log1term / LN_10 - log_nt
        } else {
            -log_nt
        });
    }

    let mut bin_tail = term;
    for i in k + 1..=n {
        let fi = i as f64;
        let bin_term = (nf - fi + 1.0) / fi;
        let mult = bin_term * p_term;
        term *= mult;
        bin_tail += term;
        if bin_term < 1.0 {
            // the remaining terms decay at least geometrically with ratio `mult`
            let err = term * ((1.0 - mult.powf(nf - fi + 1.0)) / (1.0 - mult) - 1.0);
            if err < TAIL_TOLERANCE * (-bin_tail.log10() - log_nt).abs() * bin_tail {
                break;
            }
        }
    }
    Ok(-bin_tail.log10() - log_nt)
}

/// Count the in-image pixels of `rect` and those aligned with its orientation,
/// then score them with [`nfa`].
pub fn rect_nfa(rect: &Rect, angles: &Grid<f64>, log_nt: f64) -> Result<f64> {
    let mut points = 0usize;
    let mut aligned = 0usize;
    for (x, y) in RectScan::new(rect) {
        if !angles.contains(x, y) {
            continue;
        }
        points += 1;
        let angle = angles.at(Pixel::new(x as usize, y as usize));
        if is_aligned(angle, rect.theta, rect.prec) {
            aligned += 1;
        }
    }
    nfa(points, aligned, rect.p, log_nt)
}
