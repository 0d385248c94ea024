//! Command-line parsing for the calibration curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the cleaning/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_CSV_PATH, DEFAULT_X_COL, DEFAULT_X_FLOOR, DEFAULT_Y_COL, DEFAULT_Y_FLOOR,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "calfit", version, about = "Cubic calibration-curve fitter for sensor logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean the log, fit the cubic, and print the coefficients.
    Fit(FitArgs),
    /// Fit, then show the interactive chart; coefficients print on exit.
    ///
    /// This uses the same underlying pipeline as `calfit fit`, but renders the
    /// data and the fitted curve in a blocking terminal window.
    View(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Common options for fitting and viewing.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input sensor log (CSV with a header row).
    #[arg(short = 'f', long, default_value = DEFAULT_CSV_PATH)]
    pub file: PathBuf,

    /// 0-indexed column of the x reading.
    #[arg(long, default_value_t = DEFAULT_X_COL)]
    pub x_col: usize,

    /// 0-indexed column of the y reading.
    #[arg(long, default_value_t = DEFAULT_Y_COL)]
    pub y_col: usize,

    /// x quality floor; rows below both floors are dropped as low-signal.
    #[arg(long, default_value_t = DEFAULT_X_FLOOR)]
    pub x_floor: f64,

    /// y quality floor; rows below both floors are dropped as low-signal.
    #[arg(long, default_value_t = DEFAULT_Y_FLOOR)]
    pub y_floor: f64,

    /// Print the dataset/fit summary before the coefficient block.
    #[arg(long)]
    pub stats: bool,

    /// Render an ASCII plot after the coefficient block.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results (x, y, fit, residual) to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (coefficients + quality + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `calfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
