//! Constant-acceleration rectilinear motion (MRUV) engine.
//!
//! Builds the canonical position/velocity/acceleration equations for a
//! [`Scenario`], answers stop-time and extremum questions, and separates total
//! distance travelled from net displacement. Everything here is pure: inputs
//! in, plain values or typed errors out.

pub mod distance;
pub mod explain;
pub mod scenario;
pub mod solver;

mod error;

pub use distance::{DistanceReport, Segment, total_distance};
pub use error::KinematicsError;
pub use scenario::{Mode, Scenario};
pub use solver::{
    CriticalPoint, Equations, Evaluation, Extremum, ExtremumKind, build_equations, evaluate_at,
    find_extremum, find_stop_time, from_position, from_velocity,
};
