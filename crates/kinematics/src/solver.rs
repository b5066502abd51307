//! Canonical MRUV equations and the questions asked of them.

use mruv_core::numeric::approx_eq;
use mruv_symbolic::{Expression, differentiate, integrate, solve_zeros};
use tracing::debug;

use crate::error::KinematicsError;
use crate::scenario::{Mode, Scenario};

/// Equations produced for one scenario.
///
/// Position is only present when the mode asks for it (or when derived from
/// a known velocity); acceleration is always the constant `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equations {
    pub mode: Mode,
    pub position: Option<Expression>,
    pub velocity: Option<Expression>,
    pub acceleration: f64,
}

/// Values of the equations at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub time: f64,
    pub position: Option<f64>,
    pub velocity: Option<f64>,
    pub acceleration: f64,
}

/// Time at which the velocity vanishes, with the position reached there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoint {
    pub time: f64,
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Maximum,
    Minimum,
}

impl ExtremumKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtremumKind::Maximum => "maximum",
            ExtremumKind::Minimum => "minimum",
        }
    }
}

/// Stationary point of a quadratic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub time: f64,
    pub position: f64,
    pub kind: ExtremumKind,
}

/// `s(t) = x0 + v0*t + 0.5*a*t^2`.
pub fn position_equation(x0: f64, v0: f64, acceleration: f64) -> Expression {
    let t = Expression::t;
    x0 + v0 * t() + 0.5 * acceleration * t().powi(2)
}

/// `v(t) = v0 + a*t`.
pub fn velocity_equation(v0: f64, acceleration: f64) -> Expression {
    v0 + acceleration * Expression::t()
}

/// Build the canonical equations for the scenario's mode.
pub fn build_equations(scenario: &Scenario) -> Result<Equations, KinematicsError> {
    scenario.validate()?;
    let a = scenario.acceleration;

    let equations = match scenario.mode {
        Mode::Position => {
            let position = position_equation(scenario.x0, scenario.v0, a).simplify();
            let velocity = differentiate(&position);
            let derived = constant_acceleration(&velocity)?;
            if !approx_eq(derived, a) {
                return Err(KinematicsError::InconsistentAcceleration {
                    expected: a,
                    derived,
                });
            }
            Equations {
                mode: Mode::Position,
                position: Some(position),
                velocity: Some(velocity),
                acceleration: a,
            }
        }
        Mode::Velocity => Equations {
            mode: Mode::Velocity,
            position: None,
            velocity: Some(velocity_equation(scenario.v0, a).simplify()),
            acceleration: a,
        },
        Mode::Acceleration => Equations {
            mode: Mode::Acceleration,
            position: None,
            velocity: None,
            acceleration: a,
        },
    };

    debug!(
        mode = %equations.mode,
        position = ?equations.position.as_ref().map(|e| e.to_string()),
        velocity = ?equations.velocity.as_ref().map(|e| e.to_string()),
        "built equations"
    );
    Ok(equations)
}

/// Derive velocity and acceleration from a known position equation.
pub fn from_position(position: &Expression) -> Result<Equations, KinematicsError> {
    let position = position.simplify();
    let velocity = differentiate(&position);
    let acceleration = constant_acceleration(&velocity)?;
    Ok(Equations {
        mode: Mode::Position,
        position: Some(position),
        velocity: Some(velocity),
        acceleration,
    })
}

/// Derive acceleration by differentiation and position by integration plus `x0`.
pub fn from_velocity(velocity: &Expression, x0: f64) -> Result<Equations, KinematicsError> {
    if !x0.is_finite() {
        return Err(KinematicsError::InvalidInput(format!(
            "x0 must be a finite number, got {x0}"
        )));
    }
    let velocity = velocity.simplify();
    let acceleration = constant_acceleration(&velocity)?;
    let position = (integrate(&velocity)? + x0).simplify();
    Ok(Equations {
        mode: Mode::Velocity,
        position: Some(position),
        velocity: Some(velocity),
        acceleration,
    })
}

fn constant_acceleration(velocity: &Expression) -> Result<f64, KinematicsError> {
    differentiate(velocity).as_constant().ok_or_else(|| {
        KinematicsError::InvalidInput(format!(
            "velocity `{velocity}` does not have a constant acceleration"
        ))
    })
}

/// Value of one equation at `t`.
pub fn evaluate_at(equation: &Expression, t: f64) -> Result<f64, KinematicsError> {
    Ok(equation.evaluate(t)?)
}

impl Equations {
    /// Evaluate every available equation at `t`.
    pub fn evaluate(&self, t: f64) -> Result<Evaluation, KinematicsError> {
        let position = self
            .position
            .as_ref()
            .map(|eq| evaluate_at(eq, t))
            .transpose()?;
        let velocity = self
            .velocity
            .as_ref()
            .map(|eq| evaluate_at(eq, t))
            .transpose()?;
        Ok(Evaluation {
            time: t,
            position,
            velocity,
            acceleration: self.acceleration,
        })
    }
}

/// First non-negative instant at which the velocity derived from `position` is zero.
///
/// Returns `None` when the object never stops. A position whose velocity is
/// identically zero is reported as an invalid expression.
pub fn find_stop_time(position: &Expression) -> Result<Option<CriticalPoint>, KinematicsError> {
    let velocity = differentiate(position);
    // velocity is at most linear, so its root is exact at any magnitude
    let roots = solve_zeros(&velocity, 0.0, f64::MAX)?;
    let Some(time) = roots.first().copied() else {
        debug!(velocity = %velocity, "velocity never vanishes for t >= 0");
        return Ok(None);
    };
    let stop = CriticalPoint {
        time,
        position: evaluate_at(position, time)?,
    };
    debug!(time = stop.time, position = stop.position, "found stop time");
    Ok(Some(stop))
}

/// Stationary point of a quadratic position, classified by the sign of its
/// leading coefficient (negative: maximum, positive: minimum).
pub fn find_extremum(position: &Expression) -> Result<Extremum, KinematicsError> {
    let poly = position.to_polynomial().ok_or_else(|| {
        KinematicsError::InvalidInput(format!("position `{position}` is not polynomial"))
    })?;
    if poly.degree().is_some_and(|d| d > 2) {
        return Err(KinematicsError::InvalidInput(format!(
            "position `{position}` has degree above 2"
        )));
    }
    let leading = poly.coefficient(2);
    let scale = poly
        .coefficients()
        .iter()
        .fold(0.0_f64, |m, c| m.max(c.abs()));
    if leading == 0.0 || leading.abs() <= 1.0e-12 * scale {
        return Err(KinematicsError::NoExtremum);
    }

    let time = -poly.coefficient(1) / (2.0 * leading) + 0.0;
    let kind = if leading < 0.0 {
        ExtremumKind::Maximum
    } else {
        ExtremumKind::Minimum
    };
    Ok(Extremum {
        time,
        position: evaluate_at(position, time)?,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_mode_has_no_expressions() {
        let eq = build_equations(&Scenario::acceleration(3.0)).unwrap();
        assert!(eq.position.is_none());
        assert!(eq.velocity.is_none());
        assert_eq!(eq.acceleration, 3.0);
    }

    #[test]
    fn acceleration_mode_ignores_other_fields() {
        let mut scenario = Scenario::acceleration(-2.0);
        scenario.x0 = f64::NAN;
        scenario.time = Some(f64::INFINITY);
        assert!(build_equations(&scenario).is_ok());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let scenario = Scenario::position(0.0, f64::NAN, 1.0, 1.0);
        assert!(matches!(
            build_equations(&scenario),
            Err(KinematicsError::InvalidInput(_))
        ));
    }

    #[test]
    fn quadratic_velocity_has_no_constant_acceleration() {
        let v = Expression::t().powi(2);
        assert!(matches!(
            from_velocity(&v, 0.0),
            Err(KinematicsError::InvalidInput(_))
        ));
    }
}
