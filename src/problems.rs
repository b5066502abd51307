//! Worked problems: fixed textbook exercises solved with the engine.

use mruv_kinematics::{
    Equations, explain, find_extremum, find_stop_time, from_position, from_velocity,
    total_distance,
};
use mruv_series::{PlotData, SampleWindow, plot_data};
use mruv_symbolic::Expression;

use crate::session::SessionError;

/// Plot window shared by every problem.
const PROBLEM_WINDOW: SampleWindow = SampleWindow {
    start: 0.0,
    end: 5.0,
    step: 0.1,
};

pub const TITLES: [&str; 5] = [
    "Velocity at t = 3",
    "Object coming to rest",
    "Maximum height",
    "Constant acceleration",
    "Total distance",
];

/// Solution of one worked problem.
#[derive(Debug, Clone)]
pub struct Solution {
    pub number: u8,
    pub title: &'static str,
    pub message: String,
    /// The quantity the problem asks for, in SI units.
    pub answer: f64,
    pub plot: PlotData,
}

/// Solve problem `number` (1 to 5).
pub fn solve(number: u8) -> Result<Solution, SessionError> {
    let title = number
        .checked_sub(1)
        .and_then(|i| TITLES.get(usize::from(i)))
        .copied()
        .ok_or(SessionError::UnknownProblem(number))?;

    let (message, answer, plot) = match number {
        1 => velocity_at_instant()?,
        2 => stop_time()?,
        3 => maximum_height()?,
        4 => acceleration_from_velocity()?,
        _ => distance_travelled()?,
    };
    Ok(Solution {
        number,
        title,
        message,
        answer,
        plot,
    })
}

type Outcome = (String, f64, PlotData);

/// s(t) = 5t² - 20t + 50, velocity at t = 3.
fn velocity_at_instant() -> Result<Outcome, SessionError> {
    let equations = from_position(&Expression::polynomial(&[50.0, -20.0, 5.0]))?;
    let evaluation = equations.evaluate(3.0)?;
    let plot = plot_data(
        equations.position.as_ref(),
        equations.velocity.as_ref(),
        &PROBLEM_WINDOW,
        Some(3.0),
    )?;
    let answer = evaluation.velocity.unwrap_or_default();
    Ok((explain::calculation(&equations, Some(&evaluation)), answer, plot))
}

/// s(t) = -4.9t² + 19.6t, when does the object stop.
fn stop_time() -> Result<Outcome, SessionError> {
    let equations = from_position(&Expression::polynomial(&[0.0, 19.6, -4.9]))?;
    let (position, velocity) = position_and_velocity(&equations);
    let stop = find_stop_time(&position)?;
    let plot = plot_data(
        Some(&position),
        Some(&velocity),
        &PROBLEM_WINDOW,
        stop.map(|p| p.time),
    )?;
    let answer = stop.map(|p| p.time).unwrap_or(f64::NAN);
    Ok((explain::stop_time(&position, &velocity, stop.as_ref()), answer, plot))
}

/// s(t) = -4.9t² + 30t + 10, highest point of the projectile.
fn maximum_height() -> Result<Outcome, SessionError> {
    let equations = from_position(&Expression::polynomial(&[10.0, 30.0, -4.9]))?;
    let (position, velocity) = position_and_velocity(&equations);
    let extremum = find_extremum(&position)?;
    let plot = plot_data(
        Some(&position),
        Some(&velocity),
        &PROBLEM_WINDOW,
        Some(extremum.time),
    )?;
    Ok((
        explain::extremum(&position, &velocity, &extremum),
        extremum.position,
        plot,
    ))
}

/// v(t) = 8t - 16 with s(0) = 5: acceleration and position.
fn acceleration_from_velocity() -> Result<Outcome, SessionError> {
    let x0 = 5.0;
    let equations = from_velocity(&Expression::polynomial(&[-16.0, 8.0]), x0)?;
    let plot = plot_data(
        equations.position.as_ref(),
        equations.velocity.as_ref(),
        &PROBLEM_WINDOW,
        None,
    )?;
    Ok((
        explain::from_velocity(&equations, x0),
        equations.acceleration,
        plot,
    ))
}

/// s(t) = 3t² - 12t + 20, distance travelled on [0, 4].
fn distance_travelled() -> Result<Outcome, SessionError> {
    let (lo, hi) = (0.0, 4.0);
    let equations = from_position(&Expression::polynomial(&[20.0, -12.0, 3.0]))?;
    let (position, velocity) = position_and_velocity(&equations);
    let report = total_distance(&position, lo, hi)?;
    let plot = plot_data(Some(&position), Some(&velocity), &PROBLEM_WINDOW, None)?;
    Ok((
        explain::distance(&position, lo, hi, &report),
        report.total,
        plot,
    ))
}

// from_position always fills both equations
fn position_and_velocity(equations: &Equations) -> (Expression, Expression) {
    (
        equations.position.clone().unwrap_or_else(Expression::zero),
        equations.velocity.clone().unwrap_or_else(Expression::zero),
    )
}
