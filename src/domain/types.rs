//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default Prony term count when the caller does not choose one.
pub const DEFAULT_TERM_COUNT: usize = 8;

/// Default relative-error tolerance (percent) for the fit verdict.
pub const DEFAULT_ERROR_THRESHOLD_PCT: f64 = 5.0;

/// Default dimensionless-weight floor below which a term is dropped from
/// the material card.
pub const DEFAULT_INCLUSION_THRESHOLD: f64 = 1e-4;

/// Default material name written into the card header.
pub const DEFAULT_MATERIAL_NAME: &str = "ViscoelasticMaterial";

/// One point of a frequency sweep: dynamic modulus measured at a cyclic
/// frequency.
///
/// Units are the caller's; the fit is unit-agnostic as long as they are
/// consistent (the card echoes moduli in input units and times in seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub frequency_hz: f64,
    pub modulus: f64,
}

/// A validated, frequency-sorted sweep.
///
/// Construction is the single gate for data sanity; everything downstream
/// may assume finite positive frequencies and moduli in strictly ascending
/// frequency order.
#[derive(Debug, Clone)]
pub struct MeasurementSet {
    label: String,
    points: Vec<Measurement>,
}

impl MeasurementSet {
    /// Validate and sort a raw sweep.
    ///
    /// Fails with exit code 3 when `points` is empty and exit code 2 when a
    /// value is non-finite or non-positive, or when two rows share a
    /// frequency.
    pub fn new(label: impl Into<String>, mut points: Vec<Measurement>) -> Result<Self, AppError> {
        let label = label.into();
        if points.is_empty() {
            return Err(AppError::new(3, format!("{label}: no measurements.")));
        }

        for (i, p) in points.iter().enumerate() {
            if !(p.frequency_hz.is_finite() && p.frequency_hz > 0.0) {
                return Err(AppError::new(
                    2,
                    format!(
                        "{label}: measurement {i}: frequency must be finite and > 0, got {}.",
                        p.frequency_hz
                    ),
                ));
            }
            if !(p.modulus.is_finite() && p.modulus > 0.0) {
                return Err(AppError::new(
                    2,
                    format!(
                        "{label}: measurement {i}: modulus must be finite and > 0, got {}.",
                        p.modulus
                    ),
                ));
            }
        }

        points.sort_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz));
        for pair in points.windows(2) {
            if pair[0].frequency_hz == pair[1].frequency_hz {
                return Err(AppError::new(
                    2,
                    format!(
                        "{label}: duplicate frequency {} Hz.",
                        pair[0].frequency_hz
                    ),
                ));
            }
        }

        Ok(Self { label, points })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[Measurement] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest measured frequency (Hz).
    pub fn f_min(&self) -> f64 {
        self.points[0].frequency_hz
    }

    /// Highest measured frequency (Hz).
    pub fn f_max(&self) -> f64 {
        self.points[self.points.len() - 1].frequency_hz
    }

    /// Long-term modulus estimate: the measured value at the lowest
    /// frequency. Taken as-is, not smoothed.
    pub fn e_inf(&self) -> f64 {
        self.points[0].modulus
    }

    /// Measured value at the highest frequency (glassy-side reference for
    /// the report).
    pub fn e_max(&self) -> f64 {
        self.points[self.points.len() - 1].modulus
    }
}

/// One Maxwell arm of a fitted series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PronyTerm {
    /// Relaxation time (seconds).
    pub tau_seconds: f64,
    /// Arm modulus `E_i` (input units), `>= 0`.
    pub modulus: f64,
    /// Dimensionless weight `g_i = E_i / E_0`.
    pub weight: f64,
}

/// A fitted generalized Maxwell model.
///
/// `terms` keeps the full spectrum in ascending relaxation time, including
/// arms the solver left at zero; card rendering filters by weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronySeries {
    /// Long-term (equilibrium) modulus.
    pub e_inf: f64,
    /// Measured modulus at the highest frequency, for reference.
    pub e_max: f64,
    /// Instantaneous modulus `E_0 = E_inf + Σ E_i`.
    pub e_zero: f64,
    pub terms: Vec<PronyTerm>,
}

impl PronySeries {
    /// Relaxation times in ascending order.
    pub fn taus(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.tau_seconds).collect()
    }

    /// Arm moduli, aligned with `taus()`.
    pub fn moduli(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.modulus).collect()
    }

    /// Terms whose weight exceeds `threshold`, ascending in relaxation
    /// time. Dropped terms are omitted outright, not zero-filled.
    pub fn retained(&self, threshold: f64) -> Vec<&PronyTerm> {
        self.terms.iter().filter(|t| t.weight > threshold).collect()
    }

    /// Sum of all dimensionless weights. Equals `1 - E_inf / E_0` by
    /// construction; the report prints both sides as a consistency check.
    pub fn weight_sum(&self) -> f64 {
        self.terms.iter().map(|t| t.weight).sum()
    }
}

/// Measured vs. fitted modulus at one sweep frequency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointFit {
    pub frequency_hz: f64,
    pub measured: f64,
    pub fitted: f64,
    /// `|fitted - measured| / measured * 100`.
    pub rel_error_pct: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    /// `‖A x - b‖₂` from the constrained solve.
    pub residual_norm: f64,
    pub mean_rel_error_pct: f64,
    pub max_rel_error_pct: f64,
    /// True when both mean and max relative error are within the
    /// configured threshold. Advisory only; a poor fit is still a result.
    pub within_tolerance: bool,
    pub n: usize,
}

/// Everything known about one fitted sweep.
#[derive(Debug, Clone)]
pub struct FitReport {
    pub label: String,
    pub series: PronySeries,
    pub points: Vec<PointFit>,
    pub quality: FitQuality,
}

/// Knobs of a single fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOptions {
    /// Number of Maxwell arms (log-spaced relaxation times).
    pub term_count: usize,
    /// Relative-error tolerance (percent) for the `within_tolerance`
    /// verdict.
    pub error_threshold_pct: f64,
    /// Weight floor for card inclusion.
    pub inclusion_threshold: f64,
    /// Name on the `*Material` card header.
    pub material_name: String,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            term_count: DEFAULT_TERM_COUNT,
            error_threshold_pct: DEFAULT_ERROR_THRESHOLD_PCT,
            inclusion_threshold: DEFAULT_INCLUSION_THRESHOLD,
            material_name: DEFAULT_MATERIAL_NAME.to_string(),
        }
    }
}

/// A full run’s configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_paths: Vec<PathBuf>,
    pub options: FitOptions,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub card_path: Option<PathBuf>,
    pub export_points: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
    pub svg_path: Option<PathBuf>,
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated: NaiveDate,
    pub label: String,
    pub options: FitOptions,
    pub series: PronySeries,
    pub quality: FitQuality,
    pub grid: CurveGrid,
}

/// Dense storage-modulus curve sampled from a fitted series, for plotting
/// without refitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub frequency_hz: Vec<f64>,
    pub modulus: Vec<f64>,
}
