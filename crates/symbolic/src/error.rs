use thiserror::Error;

/// Errors raised by symbolic operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymbolicError {
    #[error("expression `{expression}` is undefined at t = {at}")]
    Evaluation { expression: String, at: f64 },
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("invalid interval [{lo}, {hi}]")]
    InvalidInterval { lo: f64, hi: f64 },
}
