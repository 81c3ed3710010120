//! Process-level error type.
//!
//! Every fallible path in the crate reports an `AppError` carrying the exit
//! code the binary should terminate with:
//!
//! - `2` — invalid input: unusable arguments, malformed files, bad
//!   measurement data (non-finite or non-positive values, duplicate
//!   frequencies, fewer requested terms than the spectrum supports).
//! - `3` — no usable data: an ingest produced zero rows, or too few points
//!   remain to pose the fit.
//! - `4` — numeric or I/O failure while producing results: a degenerate
//!   solve, a non-physical instantaneous modulus, or a file that could not
//!   be written.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
