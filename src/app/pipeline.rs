//! Shared "fit pipeline" logic used by both the plain CLI and the TUI view.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest/clean -> sort -> fit -> residuals
//!
//! The front-ends can then focus on presentation (printing vs widgets), and
//! the whole compute path stays testable without a display.

use crate::domain::{FitConfig, FitResult, Residual};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_samples};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub fit: FitResult,
    pub residuals: Vec<Residual>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Load and clean the log (points come back sorted by x).
    let ingest = load_samples(config)?;

    // 2) Fit the calibration cubic.
    let fit = crate::fit::fit_cubic(&ingest.points)?;

    // 3) Compute per-point fitted values.
    let residuals = crate::report::compute_residuals(&ingest.points, &fit)?;

    Ok(RunOutput {
        ingest,
        fit,
        residuals,
    })
}
