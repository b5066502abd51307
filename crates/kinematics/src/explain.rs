//! Step-by-step explanations handed to messaging front-ends.
//!
//! Numeric results are rendered with the shared display precision; equations
//! use their canonical string form.

use std::fmt::Write;

use mruv_core::format::{compact, fixed};
use mruv_symbolic::Expression;

use crate::distance::DistanceReport;
use crate::scenario::Mode;
use crate::solver::{CriticalPoint, Equations, Evaluation, Extremum};

/// Explanation for a calculation in the scenario's own mode.
pub fn calculation(equations: &Equations, evaluation: Option<&Evaluation>) -> String {
    let mut out = String::new();
    match equations.mode {
        Mode::Position => {
            if let Some(position) = &equations.position {
                let _ = writeln!(out, "Step 1: position equation -> s(t) = {position}");
            }
            if let Some(velocity) = &equations.velocity {
                let _ = writeln!(
                    out,
                    "Step 2: differentiate s(t) to obtain v(t) -> v(t) = {velocity}"
                );
            }
            if let Some(eval) = evaluation {
                let _ = writeln!(out, "Step 3: evaluate at t = {}", fixed(eval.time));
                let _ = write!(
                    out,
                    "Position: {} m, Velocity: {} m/s",
                    optional(eval.position),
                    optional(eval.velocity)
                );
            }
        }
        Mode::Velocity => {
            if let Some(velocity) = &equations.velocity {
                let _ = writeln!(out, "Step 1: velocity equation -> v(t) = {velocity}");
            }
            if let Some(eval) = evaluation {
                let _ = writeln!(out, "Step 2: evaluate at t = {}", fixed(eval.time));
                let _ = write!(out, "Velocity: {} m/s", optional(eval.velocity));
            }
        }
        Mode::Acceleration => {
            let _ = write!(
                out,
                "Acceleration is constant: a = {} m/s²",
                fixed(equations.acceleration)
            );
        }
    }
    out.trim_end().to_string()
}

/// Explanation for the instant at which the motion stops.
pub fn stop_time(
    position: &Expression,
    velocity: &Expression,
    stop: Option<&CriticalPoint>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Step 1: differentiate s(t) = {position}");
    let _ = writeln!(out, "Result: v(t) = {velocity}");
    let _ = writeln!(out, "Step 2: solve v(t) = 0");
    match stop {
        Some(point) => {
            let _ = write!(
                out,
                "The object stops at t = {} s (s = {} m)",
                fixed(point.time),
                fixed(point.position)
            );
        }
        None => {
            let _ = write!(
                out,
                "The velocity never reaches zero for t >= 0: the object never stops"
            );
        }
    }
    out
}

/// Explanation for a maximum or minimum of a quadratic position.
pub fn extremum(position: &Expression, velocity: &Expression, extremum: &Extremum) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Step 1: differentiate s(t) = {position}");
    let _ = writeln!(out, "Result: v(t) = {velocity}");
    let _ = writeln!(
        out,
        "Step 2: solve v(t) = 0 to locate the {}",
        extremum.kind.as_str()
    );
    let _ = writeln!(out, "Time: t = {} s", fixed(extremum.time));
    let _ = writeln!(out, "Step 3: substitute t into s(t)");
    let _ = write!(
        out,
        "Position {}: {} m",
        extremum.kind.as_str(),
        fixed(extremum.position)
    );
    out
}

/// Explanation for the distance travelled, one line per monotonic segment.
pub fn distance(position: &Expression, lo: f64, hi: f64, report: &DistanceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Step 1: differentiate s(t) = {position}");
    let _ = writeln!(out, "Result: v(t) = {}", report.velocity);
    let points: Vec<String> = report.critical_points.iter().map(|t| fixed(*t)).collect();
    let _ = writeln!(
        out,
        "Step 2: critical points where v(t) changes sign in [{}, {}]: [{}]",
        compact(lo),
        compact(hi),
        points.join(", ")
    );
    let _ = writeln!(out, "Step 3: absolute distance of each segment:");
    for segment in &report.segments {
        let _ = writeln!(
            out,
            "  between t={} and t={}: {} m",
            fixed(segment.start),
            fixed(segment.end),
            fixed(segment.distance)
        );
    }
    let _ = writeln!(out, "Net displacement: {} m", fixed(report.displacement));
    let _ = write!(out, "Total distance travelled: {} m", fixed(report.total));
    out
}

/// Explanation for equations derived from a known velocity.
pub fn from_velocity(equations: &Equations, x0: f64) -> String {
    let mut out = String::new();
    if let Some(velocity) = &equations.velocity {
        let _ = writeln!(out, "Step 1: differentiate v(t) = {velocity}");
    }
    let _ = writeln!(
        out,
        "Result: a(t) = {} (constant)",
        compact(equations.acceleration)
    );
    let _ = writeln!(
        out,
        "Step 2: integrate v(t) and add s(0) = {} to obtain s(t)",
        compact(x0)
    );
    if let Some(position) = &equations.position {
        let _ = write!(out, "Position equation: s(t) = {position}");
    }
    out
}

fn optional(value: Option<f64>) -> String {
    value.map(fixed).unwrap_or_else(|| "n/a".to_string())
}
