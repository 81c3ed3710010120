//! Generalized Maxwell model primitives.
//!
//! The model is implemented as small, pure functions so that fitting and
//! reporting code can stay generic.

pub mod model;

pub use model::*;
