//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Residual;
use crate::error::AppError;

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "x,y,y_fit,residual")
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            file,
            "{},{},{:.6},{:.6}",
            r.point.x, r.point.y, r.y_fit, r.residual
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
