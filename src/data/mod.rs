//! Sweep data sources: the bundled reference sweep and the synthetic
//! sample generator.

pub mod demo;
pub mod sample;

pub use demo::*;
pub use sample::*;
