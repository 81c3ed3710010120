//! Shared fit-pipeline logic used by the `fit` and `demo` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validated sweeps -> Prony fit -> artifacts
//!
//! The front-end code can then focus on presentation (reports and plots).

use crate::domain::{FitConfig, FitReport, MeasurementSet};
use crate::error::AppError;
use crate::fit::fitter::fit_all;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// One report per input sweep, in input order.
    pub reports: Vec<FitReport>,
}

/// Fit every sweep (in parallel across sweeps) and return the reports.
pub fn run_fit(sets: &[MeasurementSet], config: &FitConfig) -> Result<RunOutput, AppError> {
    let reports = fit_all(sets, &config.options)?;
    Ok(RunOutput { reports })
}

/// Write the configured file artifacts for one fitted sweep.
pub fn write_artifacts(report: &FitReport, config: &FitConfig) -> Result<(), AppError> {
    if let Some(path) = &config.card_path {
        crate::io::card::write_card(path, &report.series, &config.options)?;
    }
    if let Some(path) = &config.export_points {
        crate::io::export::write_points_csv(path, report)?;
    }
    if let Some(path) = &config.export_fit {
        crate::io::fitfile::write_fit_json(path, report, &config.options)?;
    }
    if let Some(path) = &config.svg_path {
        crate::plot::svg::write_fit_svg(path, report, &config.options)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_sweep;
    use crate::domain::FitOptions;

    fn config() -> FitConfig {
        FitConfig {
            csv_paths: vec![],
            options: FitOptions::default(),
            plot: false,
            plot_width: 100,
            plot_height: 25,
            card_path: None,
            export_points: None,
            export_fit: None,
            svg_path: None,
        }
    }

    #[test]
    fn run_fit_matches_direct_fit() {
        let sets = vec![reference_sweep(), reference_sweep()];
        let run = run_fit(&sets, &config()).unwrap();
        assert_eq!(run.reports.len(), 2);

        let direct = crate::fit::fitter::fit(&sets[0], &FitOptions::default()).unwrap();
        assert_eq!(
            run.reports[0].series.e_zero.to_bits(),
            direct.series.e_zero.to_bits()
        );
        assert_eq!(
            run.reports[1].series.e_zero.to_bits(),
            direct.series.e_zero.to_bits()
        );
    }
}
