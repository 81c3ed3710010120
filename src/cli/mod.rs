//! Command-line parsing for the Prony-series fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_ERROR_THRESHOLD_PCT, DEFAULT_INCLUSION_THRESHOLD, DEFAULT_MATERIAL_NAME,
    DEFAULT_TERM_COUNT,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "prony",
    version,
    about = "Prony-series fitter for frequency-domain viscoelastic sweeps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit sweep CSV(s), print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Fit the bundled reference sweep (or a seeded synthetic one).
    Demo(DemoArgs),
    /// Re-emit a material card from a saved fit JSON.
    Card(CardArgs),
    /// Plot the fitted curve from a saved fit JSON.
    Plot(PlotArgs),
}

/// Fit knobs shared by `fit` and `demo`.
#[derive(Debug, Parser, Clone)]
pub struct ModelArgs {
    /// Number of Prony terms (log-spaced relaxation times), >= 2.
    #[arg(short = 'n', long = "terms", default_value_t = DEFAULT_TERM_COUNT)]
    pub terms: usize,

    /// Relative-error tolerance (percent) for the fit verdict.
    #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD_PCT)]
    pub error_threshold: f64,

    /// Weight floor below which a term is dropped from the material card.
    #[arg(long, default_value_t = DEFAULT_INCLUSION_THRESHOLD)]
    pub inclusion_threshold: f64,

    /// Material name written into the card header.
    #[arg(long, default_value = DEFAULT_MATERIAL_NAME)]
    pub material_name: String,
}

/// Output options shared by `fit` and `demo`.
#[derive(Debug, Parser, Clone)]
pub struct OutputArgs {
    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write the material card to this path.
    #[arg(long)]
    pub card: Option<PathBuf>,

    /// Export per-point results (measured/fitted/error) to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model (options + series + curve grid) to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,

    /// Render measured-vs-fitted and error panels to an SVG file.
    #[arg(long = "plot-svg")]
    pub plot_svg: Option<PathBuf>,
}

/// Options for fitting measured sweeps.
#[derive(Debug, Parser)]
pub struct FitArgs {
    /// Sweep CSV file(s) with frequency and modulus columns.
    #[arg(value_name = "CSV", required = true)]
    pub csv: Vec<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for the bundled demo data.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Generate a seeded synthetic sweep instead of the bundled reference data.
    #[arg(long)]
    pub synthetic: bool,

    /// Synthetic sweep: number of points.
    #[arg(long, default_value_t = 25)]
    pub sample_count: usize,

    /// Synthetic sweep: multiplicative log-normal noise sigma.
    #[arg(long, default_value_t = 0.02)]
    pub noise_sigma: f64,

    /// Synthetic sweep: random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for re-emitting a card from a saved fit.
#[derive(Debug, Parser)]
pub struct CardArgs {
    /// Fit JSON file produced by `prony fit --export-fit`.
    #[arg(value_name = "JSON")]
    pub fit: PathBuf,

    /// Write the card here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Options for plotting a saved fit.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fit JSON file produced by `prony fit --export-fit`.
    #[arg(value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_defaults() {
        let cli = Cli::try_parse_from(["prony", "fit", "sweep.csv"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.csv.len(), 1);
        assert_eq!(args.model.terms, DEFAULT_TERM_COUNT);
        assert_eq!(args.model.error_threshold, DEFAULT_ERROR_THRESHOLD_PCT);
        assert_eq!(args.model.inclusion_threshold, DEFAULT_INCLUSION_THRESHOLD);
        assert_eq!(args.model.material_name, DEFAULT_MATERIAL_NAME);
        assert!(args.output.plot);
        assert!(!args.output.no_plot);
        assert!(args.output.card.is_none());
    }

    #[test]
    fn fit_requires_an_input() {
        assert!(Cli::try_parse_from(["prony", "fit"]).is_err());
    }

    #[test]
    fn demo_synthetic_flags() {
        let cli = Cli::try_parse_from([
            "prony",
            "demo",
            "--synthetic",
            "--seed",
            "7",
            "--terms",
            "6",
            "--no-plot",
        ])
        .unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo subcommand");
        };
        assert!(args.synthetic);
        assert_eq!(args.seed, 7);
        assert_eq!(args.model.terms, 6);
        assert!(args.output.no_plot);
    }

    #[test]
    fn card_takes_fit_json() {
        let cli = Cli::try_parse_from(["prony", "card", "saved.json", "--out", "mat.inp"]).unwrap();
        let Command::Card(args) = cli.command else {
            panic!("expected card subcommand");
        };
        assert_eq!(args.fit, PathBuf::from("saved.json"));
        assert_eq!(args.out, Some(PathBuf::from("mat.inp")));
    }
}
