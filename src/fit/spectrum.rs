//! Relaxation-time spectrum.
//!
//! The fit places one Maxwell arm per relaxation time on a fixed log-uniform
//! grid spanning the measured frequency window, rather than treating the
//! times as free parameters.
//!
//! Why a fixed grid?
//! - It keeps the problem linear in the moduli, so one constrained
//!   least-squares solve replaces a nonlinear search.
//! - It is deterministic given the same inputs/flags.
//! - Times outside `[1/f_max, 1/f_min]` are not observable in the sweep
//!   anyway: their kernels are flat across every measured frequency.

use crate::error::AppError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid tau range: min={min}, max={max} (must be finite, >0, and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Tau steps must be >= 2."));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}

/// Relaxation times for a sweep covering `[f_min, f_max]` Hz: `terms`
/// log-spaced values from `1/f_max` up to `1/f_min`, ascending.
pub fn relaxation_spectrum(f_min: f64, f_max: f64, terms: usize) -> Result<Vec<f64>, AppError> {
    if !(f_min.is_finite() && f_max.is_finite() && f_min > 0.0 && f_max > f_min) {
        return Err(AppError::new(
            2,
            format!(
                "Invalid frequency window: [{f_min}, {f_max}] Hz (must be finite, >0, and max>min)."
            ),
        ));
    }
    if terms < 2 {
        return Err(AppError::new(
            2,
            format!("Prony term count must be >= 2, got {terms}."),
        ));
    }
    log_space(1.0 / f_max, 1.0 / f_min, terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(0.1, 10.0, 5).unwrap();
        assert!((v[0] - 0.1).abs() < 1e-12);
        assert!((v[v.len() - 1] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn log_space_is_uniform_in_log() {
        let v = log_space(1e-3, 1e3, 7).unwrap();
        for pair in v.windows(2) {
            let ratio = pair[1] / pair[0];
            assert!((ratio - 10.0).abs() < 1e-9, "ratio drifted: {ratio}");
        }
    }

    #[test]
    fn spectrum_spans_reciprocal_frequency_window() {
        let taus = relaxation_spectrum(1e-2, 1e4, 4).unwrap();
        assert_eq!(taus.len(), 4);
        assert!((taus[0] - 1e-4).abs() < 1e-16);
        assert!((taus[3] - 1e2).abs() < 1e-9);
        for pair in taus.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn spectrum_rejects_single_term() {
        let err = relaxation_spectrum(1e-2, 1e4, 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn spectrum_rejects_bad_window() {
        assert!(relaxation_spectrum(0.0, 1e4, 4).is_err());
        assert!(relaxation_spectrum(1e4, 1e-2, 4).is_err());
        assert!(relaxation_spectrum(f64::NAN, 1e4, 4).is_err());
    }
}
