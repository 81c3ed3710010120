//! Plot adapters over `FitReport`.
//!
//! - `ascii`: deterministic terminal plots
//! - `svg`: two-panel SVG overview (Plotters)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
