use mruv_symbolic::SymbolicError;
use thiserror::Error;

/// Errors surfaced by the kinematics engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("motion has no stationary point (acceleration is zero)")]
    NoExtremum,
    #[error("derived acceleration {derived} does not match input {expected}")]
    InconsistentAcceleration { expected: f64, derived: f64 },
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}
