//! Minimal symbolic calculus over a single time variable `t`.
//!
//! Expressions are small immutable trees. Anything polynomial in `t` folds
//! into a dense [`Polynomial`], which is what differentiation, integration and
//! root solving use; other trees (e.g. division by `t`) still differentiate and
//! evaluate, reporting undefined points as [`SymbolicError::Evaluation`].

mod calculus;
mod error;
mod expression;
mod polynomial;

pub use calculus::{differentiate, evaluate, integrate, solve_zeros};
pub use error::SymbolicError;
pub use expression::Expression;
pub use polynomial::Polynomial;
