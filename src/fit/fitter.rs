//! Core fitting routine.
//!
//! Given a validated sweep, we:
//! - place relaxation times on the log-uniform spectrum for the sweep's
//!   frequency window
//! - take the long-term modulus from the lowest-frequency point
//! - solve a non-negative least-squares problem for the arm moduli
//! - normalize into dimensionless weights and score the reproduction
//!
//! The solve is linear and deterministic; refitting the same sweep with the
//! same options reproduces the result bit for bit.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{
    FitOptions, FitQuality, FitReport, MeasurementSet, PointFit, PronySeries, PronyTerm,
};
use crate::error::AppError;
use crate::fit::spectrum::relaxation_spectrum;
use crate::math::nnls;
use crate::models::{fill_design_row, predict};

/// Fit one sweep into a Prony series.
pub fn fit(set: &MeasurementSet, options: &FitOptions) -> Result<FitReport, AppError> {
    if set.len() < 2 {
        return Err(AppError::new(
            3,
            format!(
                "{}: need at least 2 measurements to fit, got {}.",
                set.label(),
                set.len()
            ),
        ));
    }

    let taus = relaxation_spectrum(set.f_min(), set.f_max(), options.term_count)?;
    let e_inf = set.e_inf();

    let m = set.len();
    let n = taus.len();
    let mut a = DMatrix::<f64>::zeros(m, n);
    let mut b = DVector::<f64>::zeros(m);
    let mut row = vec![0.0; n];

    for (i, p) in set.points().iter().enumerate() {
        fill_design_row(p.frequency_hz, &taus, &mut row);
        for j in 0..n {
            a[(i, j)] = row[j];
        }
        // The target can go negative when the sweep dips below the
        // lowest-frequency modulus; only the moduli are constrained.
        b[i] = p.modulus - e_inf;
    }

    let solution = nnls(&a, &b).ok_or_else(|| {
        AppError::new(
            4,
            format!(
                "{}: constrained least-squares solve did not converge.",
                set.label()
            ),
        )
    })?;

    let moduli: Vec<f64> = solution.coefficients.iter().copied().collect();
    let e_zero = e_inf + moduli.iter().sum::<f64>();
    if !(e_zero.is_finite() && e_zero > 0.0) {
        return Err(AppError::new(
            4,
            format!(
                "{}: non-physical instantaneous modulus E0 = {e_zero}.",
                set.label()
            ),
        ));
    }

    let terms: Vec<PronyTerm> = taus
        .iter()
        .zip(&moduli)
        .map(|(&tau_seconds, &modulus)| PronyTerm {
            tau_seconds,
            modulus,
            weight: modulus / e_zero,
        })
        .collect();

    let series = PronySeries {
        e_inf,
        e_max: set.e_max(),
        e_zero,
        terms,
    };

    let points: Vec<PointFit> = set
        .points()
        .iter()
        .map(|p| {
            let fitted = predict(p.frequency_hz, e_inf, &moduli, &taus);
            PointFit {
                frequency_hz: p.frequency_hz,
                measured: p.modulus,
                fitted,
                rel_error_pct: (fitted - p.modulus).abs() / p.modulus * 100.0,
            }
        })
        .collect();

    let quality = summarize(&points, solution.residual_norm, options.error_threshold_pct);

    Ok(FitReport {
        label: set.label().to_string(),
        series,
        points,
        quality,
    })
}

/// Fit several independent sweeps, in parallel, preserving input order.
///
/// Each sweep is a self-contained solve, so batches scale across cores
/// without any shared state. The first failing sweep (in input order) wins.
pub fn fit_all(sets: &[MeasurementSet], options: &FitOptions) -> Result<Vec<FitReport>, AppError> {
    let results: Vec<Result<FitReport, AppError>> =
        sets.par_iter().map(|s| fit(s, options)).collect();
    results.into_iter().collect()
}

fn summarize(points: &[PointFit], residual_norm: f64, threshold_pct: f64) -> FitQuality {
    let n = points.len();
    let mean = points.iter().map(|p| p.rel_error_pct).sum::<f64>() / n as f64;
    let max = points.iter().map(|p| p.rel_error_pct).fold(0.0, f64::max);
    FitQuality {
        residual_norm,
        mean_rel_error_pct: mean,
        max_rel_error_pct: max,
        within_tolerance: mean <= threshold_pct && max <= threshold_pct,
        n,
    }
}
