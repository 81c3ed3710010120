//! Mathematical utilities: the storage-modulus basis and the constrained
//! least-squares solver.

pub mod basis;
pub mod nnls;

pub use basis::*;
pub use nnls::*;
