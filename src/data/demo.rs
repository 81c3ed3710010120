//! Bundled reference sweep.
//!
//! The classic 13-point dynamic-modulus sweep this tool has always shipped
//! with: one point per decade from 1 MHz down to 1 µHz. Useful as a smoke
//! test (`prony demo`) and as a regression oracle for the fitter.

use crate::domain::{Measurement, MeasurementSet};

/// (frequency Hz, dynamic modulus), highest frequency first.
const REFERENCE_POINTS: [(f64, f64); 13] = [
    (1e6, 3093.966722),
    (1e5, 2870.284624),
    (1e4, 2524.42809),
    (1e3, 2040.523),
    (1e2, 1459.974587),
    (1e1, 898.2192594),
    (1e0, 479.3197043),
    (1e-1, 237.7387891),
    (1e-2, 122.2078588),
    (1e-3, 71.14917),
    (1e-4, 48.314377),
    (1e-5, 37.538644),
    (1e-6, 32.157853),
];

/// The bundled reference sweep, validated and sorted.
pub fn reference_sweep() -> MeasurementSet {
    let points = REFERENCE_POINTS
        .iter()
        .map(|&(frequency_hz, modulus)| Measurement {
            frequency_hz,
            modulus,
        })
        .collect();
    MeasurementSet::new("reference", points).expect("bundled reference sweep is valid")
}
