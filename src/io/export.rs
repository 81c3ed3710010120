//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::FitReport;
use crate::error::AppError;

/// Write per-point results (measured, fitted, relative error) to a CSV file.
pub fn write_points_csv(path: &Path, report: &FitReport) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "frequency_hz,measured,fitted,rel_error_pct")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for p in &report.points {
        writeln!(
            file,
            "{:.10e},{:.6},{:.6},{:.6}",
            p.frequency_hz, p.measured, p.fitted, p.rel_error_pct
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
