//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads sweep CSVs (or the bundled/synthetic demo data)
//! - runs the Prony fit
//! - prints reports/plots
//! - writes optional artifacts (card, CSV, fit JSON, SVG)

use clap::Parser;

use crate::cli::{CardArgs, Command, DemoArgs, FitArgs, ModelArgs, OutputArgs, PlotArgs};
use crate::data::{SampleConfig, generate_sample, reference_sweep};
use crate::domain::{FitConfig, FitOptions, MeasurementSet};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `prony` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
        Command::Card(args) => handle_card(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.model, &args.output, args.csv.clone())?;

    let mut sets = Vec::with_capacity(config.csv_paths.len());
    for path in &config.csv_paths {
        let ingest = crate::io::ingest::load_sweep(path)?;
        for e in &ingest.row_errors {
            eprintln!("warning: {}:{}: {}", path.display(), e.line, e.message);
        }
        sets.push(ingest.set);
    }

    run_and_emit(&sets, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.model, &args.output, Vec::new())?;

    let set = if args.synthetic {
        generate_sample(&SampleConfig {
            count: args.sample_count,
            noise_sigma: args.noise_sigma,
            seed: args.seed,
        })?
    } else {
        reference_sweep()
    };

    run_and_emit(&[set], &config)
}

fn handle_card(args: CardArgs) -> Result<(), AppError> {
    let fit = crate::io::fitfile::read_fit_json(&args.fit)?;
    match &args.out {
        Some(path) => crate::io::card::write_card(path, &fit.series, &fit.options),
        None => {
            print!("{}", crate::io::card::render_card(&fit.series, &fit.options));
            Ok(())
        }
    }
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let fit = crate::io::fitfile::read_fit_json(&args.fit)?;
    println!(
        "{}",
        crate::plot::render_curve_plot(&fit.grid, args.width, args.height)
    );
    Ok(())
}

fn run_and_emit(sets: &[MeasurementSet], config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(sets, config)?;

    for report in &run.reports {
        println!(
            "{}",
            crate::report::format_fit_report(report, &config.options)
        );
        if config.plot {
            println!(
                "{}",
                crate::plot::render_fit_plot(
                    &report.points,
                    &report.series,
                    config.plot_width,
                    config.plot_height
                )
            );
            println!(
                "{}",
                crate::plot::render_error_plot(
                    &report.points,
                    config.options.error_threshold_pct,
                    config.plot_width,
                    config.plot_height
                )
            );
        }
    }

    // File artifacts are only written for single-sweep runs; the config
    // constructor refuses the combination otherwise.
    if let [report] = run.reports.as_slice() {
        pipeline::write_artifacts(report, config)?;
    }

    Ok(())
}

/// Assemble and validate the run configuration from parsed CLI args.
pub fn fit_config_from_args(
    model: &ModelArgs,
    output: &OutputArgs,
    csv_paths: Vec<std::path::PathBuf>,
) -> Result<FitConfig, AppError> {
    let config = FitConfig {
        csv_paths,
        options: FitOptions {
            term_count: model.terms,
            error_threshold_pct: model.error_threshold,
            inclusion_threshold: model.inclusion_threshold,
            material_name: model.material_name.clone(),
        },
        plot: output.plot && !output.no_plot,
        plot_width: output.width,
        plot_height: output.height,
        card_path: output.card.clone(),
        export_points: output.export.clone(),
        export_fit: output.export_fit.clone(),
        svg_path: output.plot_svg.clone(),
    };

    let wants_artifacts = config.card_path.is_some()
        || config.export_points.is_some()
        || config.export_fit.is_some()
        || config.svg_path.is_some();
    if wants_artifacts && config.csv_paths.len() > 1 {
        return Err(AppError::new(
            2,
            "File outputs (--card/--export/--export-fit/--plot-svg) need a single input CSV.",
        ));
    }

    Ok(config)
}
