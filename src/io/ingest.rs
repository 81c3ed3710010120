//! CSV ingest and normalization.
//!
//! This module turns a measured-sweep CSV into a validated `MeasurementSet`
//! that is safe to fit.
//!
//! Design goals:
//! - **Tolerant headers**: common column spellings are accepted, matched
//!   case-insensitively, BOM stripped
//! - **Row-level reporting**: unparseable rows are skipped and reported,
//!   not silently dropped
//! - **Strict values**: rows that parse but violate the data contract
//!   (non-finite, non-positive, duplicate frequency) fail the run
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Measurement, MeasurementSet};
use crate::error::AppError;

/// Accepted spellings for the frequency column.
const FREQUENCY_ALIASES: [&str; 3] = ["frequency_hz", "frequency", "freq"];

/// Accepted spellings for the modulus column.
const MODULUS_ALIASES: [&str; 2] = ["modulus", "dynamic_modulus"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the validated sweep plus row accounting.
#[derive(Debug, Clone)]
pub struct SweepIngest {
    pub set: MeasurementSet,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a sweep CSV from disk. The file stem becomes the sweep label.
pub fn load_sweep(path: &Path) -> Result<SweepIngest, AppError> {
    let label = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sweep")
        .to_string();
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_sweep(file, &label)
}

/// Parse a sweep CSV from any reader.
pub fn read_sweep<R: Read>(input: R, label: &str) -> Result<SweepIngest, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("{label}: failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let f_idx = resolve_column(&header_map, &FREQUENCY_ALIASES).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "{label}: missing frequency column (accepted: {}).",
                FREQUENCY_ALIASES.join(", ")
            ),
        )
    })?;
    let m_idx = resolve_column(&header_map, &MODULUS_ALIASES).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "{label}: missing modulus column (accepted: {}).",
                MODULUS_ALIASES.join(", ")
            ),
        )
    })?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, f_idx, m_idx) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = points.len();
    if rows_used == 0 {
        return Err(AppError::new(
            3,
            format!("{label}: no usable rows in CSV ({rows_read} read)."),
        ));
    }

    // Values that parsed but violate the data contract fail here.
    let set = MeasurementSet::new(label, points)?;

    Ok(SweepIngest {
        set,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿frequency"). If we don't strip it, schema
    // validation will incorrectly report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| header_map.get(*alias).copied())
}

fn parse_row(record: &StringRecord, f_idx: usize, m_idx: usize) -> Result<Measurement, String> {
    let frequency_hz = parse_f64(get_field(record, f_idx, "frequency")?, "frequency")?;
    let modulus = parse_f64(get_field(record, m_idx, "modulus")?, "modulus")?;
    Ok(Measurement {
        frequency_hz,
        modulus,
    })
}

fn get_field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{name}` value."))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_aliased_headers_with_bom() {
        let csv = "\u{feff}Freq,Dynamic_Modulus\n10,100\n1,50\n";
        let ingest = read_sweep(csv.as_bytes(), "t").unwrap();
        assert_eq!(ingest.rows_read, 2);
        assert_eq!(ingest.rows_used, 2);
        assert!(ingest.row_errors.is_empty());
        // Sorted ascending regardless of file order.
        assert_eq!(ingest.set.f_min(), 1.0);
        assert_eq!(ingest.set.f_max(), 10.0);
        assert_eq!(ingest.set.e_inf(), 50.0);
    }

    #[test]
    fn skips_and_reports_unparseable_rows() {
        let csv = "frequency,modulus\n1,50\nnot-a-number,60\n10,100\n";
        let ingest = read_sweep(csv.as_bytes(), "t").unwrap();
        assert_eq!(ingest.rows_read, 3);
        assert_eq!(ingest.rows_used, 2);
        assert_eq!(ingest.row_errors.len(), 1);
        assert_eq!(ingest.row_errors[0].line, 3);
    }

    #[test]
    fn missing_modulus_column_is_input_error() {
        let csv = "frequency,stiffness\n1,50\n";
        let err = read_sweep(csv.as_bytes(), "t").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_usable_rows_is_data_error() {
        let csv = "frequency,modulus\nx,y\n,\n";
        let err = read_sweep(csv.as_bytes(), "t").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn contract_violations_fail_the_run() {
        let csv = "frequency,modulus\n1,-5\n2,10\n";
        let err = read_sweep(csv.as_bytes(), "t").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
