//! Synthetic sweep generation from a built-in reference model.
//!
//! `prony demo --synthetic` fits data this module makes up: a three-arm
//! generalized Maxwell model evaluated on a log-spaced frequency grid, with
//! seeded multiplicative log-normal noise. The noise is mean-corrected so
//! the expected value of each noisy modulus equals the model value, keeping
//! the generated sweep unbiased.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Measurement, MeasurementSet};
use crate::error::AppError;
use crate::fit::spectrum::log_space;
use crate::models::predict;

/// Long-term modulus of the built-in model.
pub const MODEL_E_INF: f64 = 40.0;
/// Arm moduli of the built-in model.
pub const MODEL_MODULI: [f64; 3] = [1500.0, 900.0, 500.0];
/// Arm relaxation times (seconds) of the built-in model.
pub const MODEL_TAUS: [f64; 3] = [1e-3, 1e-1, 1e1];

/// Frequency window of the generated sweep (Hz). Chosen so every arm of the
/// built-in model is observable: the reciprocal window covers all three
/// relaxation times with margin.
const SAMPLE_F_MIN: f64 = 1e-4;
const SAMPLE_F_MAX: f64 = 1e4;

/// Knobs for synthetic sweep generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of sweep points (log-spaced in frequency).
    pub count: usize,
    /// Standard deviation of the multiplicative log-normal noise.
    pub noise_sigma: f64,
    /// Random seed; the same seed reproduces the same sweep.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 25,
            noise_sigma: 0.02,
            seed: 42,
        }
    }
}

/// Generate a synthetic sweep from the built-in model.
pub fn generate_sample(config: &SampleConfig) -> Result<MeasurementSet, AppError> {
    if config.count < 2 {
        return Err(AppError::new(
            2,
            format!("Sample count must be >= 2, got {}.", config.count),
        ));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::new(
            2,
            format!("Noise sigma must be finite and >= 0, got {}.", config.noise_sigma),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let frequencies = log_space(SAMPLE_F_MIN, SAMPLE_F_MAX, config.count)?;

    let sigma = config.noise_sigma;
    // E[exp(sigma z - sigma^2/2)] == 1, so the noisy sweep stays unbiased.
    let mean_correction = 0.5 * sigma * sigma;

    let points = frequencies
        .iter()
        .map(|&frequency_hz| {
            let base = predict(frequency_hz, MODEL_E_INF, &MODEL_MODULI, &MODEL_TAUS);
            let z: f64 = normal.sample(&mut rng);
            Measurement {
                frequency_hz,
                modulus: base * (sigma * z - mean_correction).exp(),
            }
        })
        .collect();

    MeasurementSet::new(format!("synthetic-{}", config.seed), points)
}
