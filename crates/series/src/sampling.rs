//! Evenly spaced evaluation of expressions over a time window.

use mruv_core::constants::{DEFAULT_STEP_S, DEFAULT_WINDOW_END_S, DEFAULT_WINDOW_START_S};
use mruv_symbolic::{Expression, SymbolicError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Upper bound on the number of samples produced by one call.
const MAX_SAMPLES: usize = 1_000_000;
/// Slack, in units of one step, absorbed when deciding whether `hi` is on the grid.
const GRID_SLACK: f64 = 1.0e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("sampling step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("invalid sampling interval [{lo}, {hi}]")]
    InvalidInterval { lo: f64, hi: f64 },
    #[error("sampling would produce {0} points")]
    TooManySamples(usize),
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

/// Closed time window sampled with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleWindow {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START_S,
            end: DEFAULT_WINDOW_END_S,
            step: DEFAULT_STEP_S,
        }
    }
}

/// One instant with the value of every sampled expression, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub t: f64,
    pub values: Vec<f64>,
}

/// Position and velocity at one instant; absent equations stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
}

/// Number of grid points `lo, lo + step, ...` that do not pass `hi`.
pub fn sample_count(lo: f64, hi: f64, step: f64) -> Result<usize, SeriesError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SeriesError::InvalidStep(step));
    }
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(SeriesError::InvalidInterval { lo, hi });
    }
    let steps = ((hi - lo) / step + GRID_SLACK).floor();
    if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
        return Err(SeriesError::TooManySamples((steps as usize).saturating_add(1)));
    }
    Ok(steps as usize + 1)
}

/// Grid instants `lo + i*step`, never beyond `hi`.
pub fn time_grid(lo: f64, hi: f64, step: f64) -> Result<impl Iterator<Item = f64>, SeriesError> {
    let count = sample_count(lo, hi, step)?;
    // multiply rather than accumulate so rounding does not drift
    Ok((0..count).map(move |i| (lo + i as f64 * step).min(hi)))
}

/// Evaluate every expression on the grid over `[lo, hi]`.
///
/// Deterministic and stateless: identical arguments always give identical rows.
pub fn sample(
    equations: &[Expression],
    lo: f64,
    hi: f64,
    step: f64,
) -> Result<Vec<SampleRow>, SeriesError> {
    let rows = time_grid(lo, hi, step)?
        .map(|t| highlight(equations, t))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(lo, hi, step, rows = rows.len(), "sampled series");
    Ok(rows)
}

/// Evaluate every expression at a single instant, which may lie outside any window.
pub fn highlight(equations: &[Expression], t: f64) -> Result<SampleRow, SeriesError> {
    let values = equations
        .iter()
        .map(|eq| eq.evaluate(t))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SampleRow { t, values })
}

/// `(t, position, velocity)` samples over the window.
pub fn sample_motion(
    position: Option<&Expression>,
    velocity: Option<&Expression>,
    window: &SampleWindow,
) -> Result<Vec<SamplePoint>, SeriesError> {
    time_grid(window.start, window.end, window.step)?
        .map(|t| -> Result<SamplePoint, SeriesError> {
            Ok(SamplePoint {
                t,
                position: position.map(|eq| eq.evaluate(t)).transpose()?,
                velocity: velocity.map(|eq| eq.evaluate(t)).transpose()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_has_101_points() {
        let w = SampleWindow::default();
        assert_eq!(sample_count(w.start, w.end, w.step).unwrap(), 101);
    }

    #[test]
    fn grid_never_passes_upper_bound() {
        let grid: Vec<f64> = time_grid(0.0, 1.0, 0.3).unwrap().collect();
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|t| *t <= 1.0));
        assert!((grid[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(sample_count(0.0, 1.0, 0.0), Err(SeriesError::InvalidStep(0.0)));
        assert_eq!(
            sample_count(0.0, 1.0, -0.5),
            Err(SeriesError::InvalidStep(-0.5))
        );
        assert!(matches!(
            sample_count(0.0, 1.0, f64::NAN),
            Err(SeriesError::InvalidStep(_))
        ));
    }

    #[test]
    fn rejects_runaway_sample_counts() {
        assert!(matches!(
            sample_count(0.0, 1.0e9, 1.0e-3),
            Err(SeriesError::TooManySamples(_))
        ));
    }

    #[test]
    fn huge_spans_report_too_many_samples() {
        assert_eq!(
            sample_count(0.0, 1.0e300, 1.0e-10),
            Err(SeriesError::TooManySamples(usize::MAX))
        );
        assert_eq!(
            sample_count(-f64::MAX, f64::MAX, 1.0),
            Err(SeriesError::TooManySamples(usize::MAX))
        );
    }
}
