//! Prony-series fitting.
//!
//! Responsibilities:
//!
//! - place the relaxation-time spectrum for a sweep's frequency window
//! - assemble and solve the non-negative least-squares problem
//! - post-process into weights, per-point errors, and a quality verdict

pub mod fitter;
pub mod spectrum;

pub use fitter::*;
pub use spectrum::*;
