//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a fitted model:
//! - the Prony series (E_inf, E_0, per-term moduli/weights/times)
//! - the fit options that produced it and the quality diagnostics
//! - a precomputed fitted grid for quick plotting without refitting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveGrid, FitFile, FitOptions, FitReport, PronySeries};
use crate::error::AppError;
use crate::fit::spectrum::log_space;
use crate::models::predict_series;

/// Grid density for the saved fitted curve.
const GRID_POINTS: usize = 101;

/// Write a fit JSON file.
pub fn write_fit_json(
    path: &Path,
    report: &FitReport,
    options: &FitOptions,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create fit JSON '{}': {e}", path.display()),
        )
    })?;

    let f_min = report.points[0].frequency_hz;
    let f_max = report.points[report.points.len() - 1].frequency_hz;
    let grid = build_grid(&report.series, f_min, f_max, GRID_POINTS)?;

    let fit = FitFile {
        tool: "prony".to_string(),
        generated: chrono::Local::now().date_naive(),
        label: report.label.clone(),
        options: options.clone(),
        series: report.series.clone(),
        quality: report.quality.clone(),
        grid,
    };

    serde_json::to_writer_pretty(file, &fit)
        .map_err(|e| AppError::new(4, format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open fit JSON '{}': {e}", path.display()),
        )
    })?;
    let fit: FitFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    Ok(fit)
}

/// Sample the fitted storage modulus on a log-spaced frequency grid.
pub fn build_grid(
    series: &PronySeries,
    f_min: f64,
    f_max: f64,
    n: usize,
) -> Result<CurveGrid, AppError> {
    let frequency_hz = log_space(f_min, f_max, n.max(2))?;
    let modulus = frequency_hz
        .iter()
        .map(|&f| predict_series(series, f))
        .collect();
    Ok(CurveGrid {
        frequency_hz,
        modulus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, PronyTerm};

    fn series() -> PronySeries {
        PronySeries {
            e_inf: 30.0,
            e_max: 110.0,
            e_zero: 120.0,
            terms: vec![
                PronyTerm {
                    tau_seconds: 0.01,
                    modulus: 50.0,
                    weight: 50.0 / 120.0,
                },
                PronyTerm {
                    tau_seconds: 1.0,
                    modulus: 40.0,
                    weight: 40.0 / 120.0,
                },
            ],
        }
    }

    #[test]
    fn grid_spans_the_frequency_window() {
        let grid = build_grid(&series(), 1e-2, 1e3, 101).unwrap();
        assert_eq!(grid.frequency_hz.len(), 101);
        assert_eq!(grid.modulus.len(), 101);
        assert!((grid.frequency_hz[0] - 1e-2).abs() < 1e-12);
        assert!((grid.frequency_hz[100] - 1e3).abs() < 1e-9);

        // Storage modulus of a Maxwell model is non-decreasing in frequency.
        for pair in grid.modulus.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-9);
        }
        assert!(grid.modulus[0] >= 30.0);
        assert!(grid.modulus[100] <= 120.0);
    }

    #[test]
    fn fit_file_roundtrips_through_json() {
        let fit = FitFile {
            tool: "prony".to_string(),
            generated: chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            label: "sweep".to_string(),
            options: FitOptions::default(),
            series: series(),
            quality: FitQuality {
                residual_norm: 0.5,
                mean_rel_error_pct: 1.0,
                max_rel_error_pct: 2.0,
                within_tolerance: true,
                n: 13,
            },
            grid: build_grid(&series(), 1e-2, 1e3, 11).unwrap(),
        };

        let json = serde_json::to_string(&fit).unwrap();
        let back: FitFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tool, "prony");
        assert_eq!(back.label, "sweep");
        assert_eq!(back.series.terms.len(), 2);
        assert_eq!(back.grid.frequency_hz.len(), 11);
        assert_eq!(back.quality.n, 13);
        assert!(back.quality.within_tolerance);
    }
}
