use super::nfa::rect_nfa;
use super::rect::Rect;
use crate::error::Result;
use crate::image::Grid;

/// Width removed by a single shrinking step.
const DELTA: f64 = 0.5;
/// Narrowest rectangle the search may produce.
const MIN_WIDTH: f64 = 0.5;
const TRIES_PER_STAGE: usize = 5;

#[derive(Clone, Copy, Debug)]
enum Mutation {
    FinerPrecision,
    Narrower,
    ShiftLeft,
    ShiftRight,
}

const STAGES: [Mutation; 5] = [
    Mutation::FinerPrecision,
    Mutation::Narrower,
    Mutation::ShiftLeft,
    Mutation::ShiftRight,
    Mutation::FinerPrecision,
];

impl Mutation {
    /// Apply one step to `rect`; `false` when the step would make it too thin.
    fn apply(self, rect: &mut Rect) -> bool {
        match self {
            Mutation::FinerPrecision => {
                rect.set_probability(rect.p / 2.0);
                true
            }
            _ if rect.width - DELTA < MIN_WIDTH => false,
            Mutation::Narrower => {
                rect.width -= DELTA;
                true
            }
            Mutation::ShiftLeft => {
                rect.shift_sides(DELTA / 2.0, DELTA);
                true
            }
            Mutation::ShiftRight => {
                rect.shift_sides(-DELTA / 2.0, DELTA);
                true
            }
        }
    }
}

/// Local search for a more significant rectangle.
///
/// Each stage perturbs a scratch copy of `rect` up to five times; `rect` is
/// replaced whenever a candidate strictly beats the best score so far. Returns
/// the best `-log10(NFA)`, never lower than the score of the input rectangle.
pub fn improve(rect: &mut Rect, angles: &Grid<f64>, log_nt: f64, log_eps: f64) -> Result<f64> {
    let mut best = rect_nfa(rect, angles, log_nt)?;
    if best > log_eps {
        return Ok(best);
    }

    for stage in STAGES {
        let mut candidate = rect.clone();
        for _ in 0..TRIES_PER_STAGE {
            if !stage.apply(&mut candidate) {
                continue;
            }
            let score = rect_nfa(&candidate, angles, log_nt)?;
            if score > best {
                best = score;
                *rect = candidate.clone();
            }
        }
        if best > log_eps {
            log::trace!("improve stopped after {stage:?} with {best:.3}");
            return Ok(best);
        }
    }
    Ok(best)
}
