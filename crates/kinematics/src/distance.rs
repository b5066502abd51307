//! Total distance travelled versus net displacement over an interval.

use mruv_core::constants::ROOT_TOLERANCE;
use mruv_symbolic::{Expression, differentiate, solve_zeros};
use tracing::debug;

use crate::error::KinematicsError;
use crate::solver::evaluate_at;

/// One monotonic stretch of the motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub distance: f64,
}

/// Breakdown of the distance travelled between two instants.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceReport {
    pub velocity: Expression,
    /// Interior instants where the velocity vanishes, ascending.
    pub critical_points: Vec<f64>,
    pub segments: Vec<Segment>,
    /// Sum of absolute segment displacements, always `>= 0`.
    pub total: f64,
    /// `position(hi) - position(lo)`.
    pub displacement: f64,
}

/// Total distance travelled by `position` over `[lo, hi]`.
///
/// Velocity zeros strictly inside the interval split it into monotonic
/// segments; each segment contributes its absolute displacement exactly once.
pub fn total_distance(
    position: &Expression,
    lo: f64,
    hi: f64,
) -> Result<DistanceReport, KinematicsError> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(KinematicsError::InvalidInput(format!(
            "interval [{lo}, {hi}] is empty or not finite"
        )));
    }

    let velocity = differentiate(position);
    let critical_points: Vec<f64> = match velocity.to_polynomial() {
        // at rest the whole time: nothing to split
        Some(poly) if poly.is_zero() => Vec::new(),
        _ => solve_zeros(&velocity, lo, hi)?
            .into_iter()
            .filter(|t| *t > lo + ROOT_TOLERANCE && *t < hi - ROOT_TOLERANCE)
            .collect(),
    };

    let mut breakpoints = Vec::with_capacity(critical_points.len() + 2);
    breakpoints.push(lo);
    breakpoints.extend(critical_points.iter().copied());
    breakpoints.push(hi);

    let mut segments = Vec::with_capacity(breakpoints.len() - 1);
    let mut previous = evaluate_at(position, lo)?;
    for pair in breakpoints.windows(2) {
        let current = evaluate_at(position, pair[1])?;
        segments.push(Segment {
            start: pair[0],
            end: pair[1],
            distance: (current - previous).abs(),
        });
        previous = current;
    }

    let total: f64 = segments.iter().map(|s| s.distance).sum();
    let displacement = evaluate_at(position, hi)? - evaluate_at(position, lo)?;
    debug!(
        lo,
        hi,
        total,
        displacement,
        critical = critical_points.len(),
        "accumulated distance"
    );

    Ok(DistanceReport {
        velocity,
        critical_points,
        segments,
        total,
        displacement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stationary_object_travels_nothing() {
        let s = Expression::constant(7.0);
        let report = total_distance(&s, 0.0, 5.0).unwrap();
        assert_eq!(report.total, 0.0);
        assert!(report.critical_points.is_empty());
        assert_eq!(report.segments.len(), 1);
    }

    #[test]
    fn boundary_roots_are_not_double_counted() {
        // v = 2t - 4 vanishes at t = 2, which is the upper bound here
        let s = Expression::polynomial(&[0.0, -4.0, 1.0]);
        let report = total_distance(&s, 0.0, 2.0).unwrap();
        assert!(report.critical_points.is_empty());
        assert_eq!(report.segments.len(), 1);
        assert!((report.total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_interval() {
        let s = Expression::polynomial(&[1.0, 1.0]);
        let report = total_distance(&s, 3.0, 3.0).unwrap();
        assert_eq!(report.total, 0.0);
        assert!(total_distance(&s, 3.0, 2.0).is_err());
    }
}
