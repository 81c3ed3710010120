//! Reporting utilities: formatted terminal output for fit diagnostics.

pub mod format;

pub use format::*;
