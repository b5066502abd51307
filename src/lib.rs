//! MRUV calculator: constant-acceleration kinematics for the command line.
//!
//! The engine lives in the member crates and is re-exported here; this crate
//! adds the session controller that ties a calculation to its history, the
//! catalogue of worked problems and the conversion of scenario manifests.

pub mod problems;
pub mod scenario;
pub mod session;

pub use mruv_config as config;
pub use mruv_export as export;
pub use mruv_kinematics as kinematics;
pub use mruv_series as series;
pub use mruv_symbolic as symbolic;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
