//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - material-card emission (`card`)
//! - per-point result export (`export`)
//! - fit JSON read/write (`fitfile`)

pub mod card;
pub mod export;
pub mod fitfile;
pub mod ingest;

pub use card::*;
pub use export::*;
pub use fitfile::*;
pub use ingest::*;
