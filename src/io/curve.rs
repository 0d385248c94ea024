//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - the four cubic coefficients and fit quality
//! - the source log the curve was fitted from
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, FitResult};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::plot::sample_curve;

/// Write a curve JSON file.
///
/// The grid spans the ingested x-range, sampled at twice the point count
/// (the same density the plots use).
pub fn write_curve_json(
    path: &Path,
    fit: &FitResult,
    ingest: &IngestedData,
    source: &Path,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create curve JSON '{}': {e}",
            path.display()
        ))
    })?;

    let samples = sample_curve(
        fit,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.n_points.saturating_mul(2),
    );
    let (x, y): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();

    let curve = CurveFile {
        tool: "calfit".to_string(),
        source: source.to_path_buf(),
        coefficients: fit.coeffs,
        fit_quality: fit.quality.clone(),
        grid: CurveGrid { x, y },
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::usage(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open curve JSON '{}': {e}",
            path.display()
        ))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cubic, DatasetStats, FitQuality, SamplePoint, SkipCounts};
    use std::path::PathBuf;

    #[test]
    fn curve_json_round_trips() {
        let fit = FitResult {
            coeffs: Cubic {
                a: 1.0,
                b: -2.0,
                c: 3.0,
                d: -4.0,
            },
            quality: FitQuality {
                sse: 0.25,
                rmse: 0.25,
                n: 4,
            },
        };
        let ingest = IngestedData {
            points: vec![
                SamplePoint { x: 1.0, y: -2.0 },
                SamplePoint { x: 2.0, y: 2.0 },
                SamplePoint { x: 3.0, y: 14.0 },
                SamplePoint { x: 4.0, y: 40.0 },
            ],
            stats: DatasetStats {
                n_points: 4,
                x_min: 1.0,
                x_max: 4.0,
                y_min: -2.0,
                y_max: 40.0,
            },
            rows_read: 4,
            rows_used: 4,
            skipped: SkipCounts::default(),
        };

        let path =
            std::env::temp_dir().join(format!("calfit_curve_{}.json", std::process::id()));
        write_curve_json(&path, &fit, &ingest, &PathBuf::from("log.csv")).unwrap();
        let loaded = read_curve_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.tool, "calfit");
        assert_eq!(loaded.coefficients, fit.coeffs);
        // Grid density: twice the point count, spanning the x-range.
        assert_eq!(loaded.grid.x.len(), 8);
        assert_eq!(loaded.grid.x[0], 1.0);
        assert_eq!(loaded.grid.x[7], 4.0);
        assert_eq!(loaded.grid.y.len(), 8);
    }
}
