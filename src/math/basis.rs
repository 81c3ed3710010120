//! Storage-modulus basis for the generalized Maxwell model.
//!
//! Each Maxwell arm with relaxation time `τ` contributes to the storage
//! modulus at angular frequency `ω` through the Debye kernel:
//!
//! - `d(ω, τ) = (ωτ)² / (1 + (ωτ)²)`
//!
//! Numerical notes:
//! - The kernel lies in `[0, 1)`: it vanishes as `ωτ → 0` and saturates
//!   toward 1 as `ωτ → ∞`.
//! - For large `x = ωτ`, squaring first can overflow. Above `LARGE_X` we
//!   evaluate the equivalent form `1 / (1 + 1/x²)` instead.

use std::f64::consts::TAU;

/// Threshold above which the reciprocal form is used.
const LARGE_X: f64 = 1e150;

/// Angular frequency `ω = 2πf` for a cyclic frequency in Hz.
pub fn angular_frequency(f_hz: f64) -> f64 {
    TAU * f_hz
}

/// Compute the storage kernel `(ωτ)² / (1 + (ωτ)²)`.
pub fn storage_basis(omega: f64, tau: f64) -> f64 {
    let x = omega * tau;

    if x.abs() > LARGE_X {
        // 1 / (1 + 1/x²); 1/x² underflows to 0 and the kernel saturates at 1.
        let inv = 1.0 / x;
        return 1.0 / (1.0 + inv * inv);
    }

    let x2 = x * x;
    x2 / (1.0 + x2)
}
