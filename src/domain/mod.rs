//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated sweep inputs (`Measurement`, `MeasurementSet`)
//! - fit outputs (`PronySeries`, `FitReport`, `FitQuality`, etc.)
//! - run configuration (`FitOptions`, `FitConfig`) and the saved-fit file

pub mod types;

pub use types::*;
