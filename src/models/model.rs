//! Generalized Maxwell model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given frequency and relaxation times (for the
//!   constrained least-squares solve)
//! - predict the storage modulus `E'(f)` given the fitted moduli (for
//!   residuals/plots)

use crate::domain::PronySeries;
use crate::math::{angular_frequency, storage_basis};

/// Fill a design row with the storage kernel of each relaxation time at the
/// given frequency.
///
/// # Panics
/// Panics if `out` is shorter than `taus`. Callers should size these arrays
/// to the term count.
pub fn fill_design_row(f_hz: f64, taus: &[f64], out: &mut [f64]) {
    let omega = angular_frequency(f_hz);
    for (slot, &tau) in out.iter_mut().zip(taus) {
        *slot = storage_basis(omega, tau);
    }
}

/// Predict the storage modulus at `f_hz`:
/// `E'(f) = E_inf + Σ E_i (ωτ_i)² / (1 + (ωτ_i)²)`.
pub fn predict(f_hz: f64, e_inf: f64, moduli: &[f64], taus: &[f64]) -> f64 {
    let omega = angular_frequency(f_hz);
    let mut sum = e_inf;
    for (&e, &tau) in moduli.iter().zip(taus) {
        sum += e * storage_basis(omega, tau);
    }
    sum
}

/// Predict the storage modulus of a fitted series at `f_hz`.
pub fn predict_series(series: &PronySeries, f_hz: f64) -> f64 {
    let omega = angular_frequency(f_hz);
    let mut sum = series.e_inf;
    for term in &series.terms {
        sum += term.modulus * storage_basis(omega, term.tau_seconds);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_is_bracketed_by_plateaus() {
        // A Maxwell model interpolates between E_inf (slow) and
        // E_inf + ΣE_i (fast).
        let e_inf = 10.0;
        let moduli = [50.0, 20.0];
        let taus = [0.1, 10.0];

        let slow = predict(1e-9, e_inf, &moduli, &taus);
        let fast = predict(1e9, e_inf, &moduli, &taus);
        assert!((slow - 10.0).abs() < 1e-6, "slow plateau: {slow}");
        assert!((fast - 80.0).abs() < 1e-6, "fast plateau: {fast}");

        let mid = predict(1.0, e_inf, &moduli, &taus);
        assert!(mid > slow && mid < fast);
    }

    #[test]
    fn design_row_matches_predict() {
        let taus = [1e-3, 1.0, 1e3];
        let moduli = [5.0, 7.0, 11.0];
        let f = 0.37;

        let mut row = [0.0; 3];
        fill_design_row(f, &taus, &mut row);

        let via_row: f64 = row.iter().zip(&moduli).map(|(r, e)| r * e).sum();
        let direct = predict(f, 0.0, &moduli, &taus);
        assert!((via_row - direct).abs() < 1e-12);
    }
}
