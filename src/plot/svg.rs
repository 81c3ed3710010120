//! SVG rendering of a fit (Plotters, SVG backend).
//!
//! Two stacked panels:
//! - measured vs fitted modulus, log-log
//! - relative error vs frequency, semilog-x, with the tolerance threshold
//!
//! The drawing itself runs inside a `Box<dyn Error>` helper so all Plotters
//! error types funnel into one `AppError` with the target path attached.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{FitOptions, FitReport};
use crate::error::AppError;
use crate::models::predict_series;

const SIZE: (u32, u32) = (900, 700);
const CURVE_SAMPLES: usize = 200;

/// Write the two-panel fit overview SVG.
pub fn write_fit_svg(path: &Path, report: &FitReport, options: &FitOptions) -> Result<(), AppError> {
    draw(path, report, options).map_err(|e| {
        AppError::new(
            4,
            format!("Failed to render SVG '{}': {e}", path.display()),
        )
    })
}

fn draw(
    path: &Path,
    report: &FitReport,
    options: &FitOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (top, bottom) = root.split_vertically(SIZE.1 / 2);

    let f_min = report.points[0].frequency_hz;
    let f_max = report.points[report.points.len() - 1].frequency_hz;

    // Fitted curve sampled densely in log-frequency.
    let l0 = f_min.log10();
    let l1 = f_max.log10();
    let curve: Vec<(f64, f64)> = (0..CURVE_SAMPLES)
        .map(|i| {
            let u = i as f64 / (CURVE_SAMPLES as f64 - 1.0);
            let f = 10f64.powf(l0 + u * (l1 - l0));
            (f, predict_series(&report.series, f))
        })
        .collect();

    let mut e_min = f64::INFINITY;
    let mut e_max = f64::NEG_INFINITY;
    for v in report
        .points
        .iter()
        .flat_map(|p| [p.measured, p.fitted])
        .chain(curve.iter().map(|&(_, e)| e))
    {
        e_min = e_min.min(v);
        e_max = e_max.max(v);
    }
    let e_min = e_min * 0.8;
    let e_max = e_max * 1.25;

    let mut modulus_chart = ChartBuilder::on(&top)
        .margin(10)
        .caption(
            format!("{}: measured vs fitted", report.label),
            ("sans-serif", 18),
        )
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d((f_min..f_max).log_scale(), (e_min..e_max).log_scale())?;
    modulus_chart
        .configure_mesh()
        .x_desc("frequency (Hz)")
        .y_desc("dynamic modulus")
        .draw()?;
    modulus_chart.draw_series(LineSeries::new(curve, &BLUE))?;
    modulus_chart.draw_series(
        report
            .points
            .iter()
            .map(|p| Circle::new((p.frequency_hz, p.measured), 3, RED.filled())),
    )?;

    let err_top = report
        .points
        .iter()
        .map(|p| p.rel_error_pct)
        .fold(options.error_threshold_pct, f64::max)
        * 1.1;

    let mut error_chart = ChartBuilder::on(&bottom)
        .margin(10)
        .caption("relative error", ("sans-serif", 18))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d((f_min..f_max).log_scale(), 0.0..err_top)?;
    error_chart
        .configure_mesh()
        .x_desc("frequency (Hz)")
        .y_desc("rel. error (%)")
        .draw()?;
    error_chart.draw_series(LineSeries::new(
        [
            (f_min, options.error_threshold_pct),
            (f_max, options.error_threshold_pct),
        ],
        &BLACK,
    ))?;
    error_chart.draw_series(
        report
            .points
            .iter()
            .map(|p| Circle::new((p.frequency_hz, p.rel_error_pct), 3, RED.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_sweep;
    use crate::fit::fit;

    #[test]
    fn writes_a_parseable_svg() {
        let report = fit(&reference_sweep(), &FitOptions::default()).unwrap();
        let path = std::env::temp_dir().join("prony_fit_svg_test.svg");

        write_fit_svg(&path, &report, &FitOptions::default()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("</svg>"));
        let _ = std::fs::remove_file(&path);
    }
}
