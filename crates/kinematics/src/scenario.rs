use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;

/// Which canonical equation a calculation treats as primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Position,
    Velocity,
    Acceleration,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Position => "position",
            Mode::Velocity => "velocity",
            Mode::Acceleration => "acceleration",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric inputs for one calculation. Fields the mode does not use are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub mode: Mode,
    pub x0: f64,
    pub v0: f64,
    pub acceleration: f64,
    pub time: Option<f64>,
}

impl Scenario {
    pub fn position(x0: f64, v0: f64, acceleration: f64, time: f64) -> Self {
        Self {
            mode: Mode::Position,
            x0,
            v0,
            acceleration,
            time: Some(time),
        }
    }

    pub fn velocity(v0: f64, acceleration: f64, time: f64) -> Self {
        Self {
            mode: Mode::Velocity,
            x0: 0.0,
            v0,
            acceleration,
            time: Some(time),
        }
    }

    pub fn acceleration(acceleration: f64) -> Self {
        Self {
            mode: Mode::Acceleration,
            x0: 0.0,
            v0: 0.0,
            acceleration,
            time: None,
        }
    }

    /// Check that every field relevant to the mode is a finite number.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        let relevant: Vec<(&str, f64)> = match self.mode {
            Mode::Position => vec![
                ("x0", self.x0),
                ("v0", self.v0),
                ("acceleration", self.acceleration),
            ],
            Mode::Velocity => vec![("v0", self.v0), ("acceleration", self.acceleration)],
            Mode::Acceleration => vec![("acceleration", self.acceleration)],
        };
        for (name, value) in relevant {
            require_finite(name, value)?;
        }
        if self.mode != Mode::Acceleration {
            if let Some(time) = self.time {
                require_finite("time", time)?;
            }
        }
        Ok(())
    }

    /// Evaluation time, required for the time-dependent modes.
    pub fn required_time(&self) -> Result<f64, KinematicsError> {
        self.time.ok_or_else(|| {
            KinematicsError::InvalidInput(format!("time is required in {} mode", self.mode))
        })
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), KinematicsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KinematicsError::InvalidInput(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}
