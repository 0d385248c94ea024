//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the ingest/fit pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs};
use crate::domain::FitConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `calfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `calfit` (and `calfit -f log.csv`) to behave like
    // `calfit view ...`, matching the tool's print-then-show heritage.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::View(args) => handle_view(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    if config.show_stats {
        print!("{}", crate::report::format_summary(&run.ingest, &run.fit));
    }

    println!("{}", crate::report::format_coefficients(&run.fit));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.points,
            &run.fit,
            config.plot_width,
            config.plot_height,
        );
        print!("{plot}");
    }

    write_exports(&config, &run)
}

fn handle_view(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    // Blocks until the user dismisses the chart.
    crate::tui::run(&run, &config)?;

    // The terminal is back to normal now; print the same block `fit` would.
    if config.show_stats {
        print!("{}", crate::report::format_summary(&run.ingest, &run.fit));
    }
    println!("{}", crate::report::format_coefficients(&run.fit));

    write_exports(&config, &run)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    print!("{plot}");
    Ok(())
}

fn write_exports(config: &FitConfig, run: &pipeline::RunOutput) -> Result<(), AppError> {
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run.fit, &run.ingest, &config.csv_path)?;
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        csv_path: args.file.clone(),
        x_col: args.x_col,
        y_col: args.y_col,
        x_floor: args.x_floor,
        y_floor: args.y_floor,
        show_stats: args.stats,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

/// Rewrite argv so `calfit` defaults to `calfit view`.
///
/// Rules:
/// - `calfit`                      -> `calfit view`
/// - `calfit -f log.csv ...`       -> `calfit view -f log.csv ...`
/// - `calfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("view".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "view" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "view flags".
    if arg1.starts_with('-') {
        argv.insert(1, "view".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
