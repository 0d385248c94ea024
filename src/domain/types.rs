//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during cleaning and fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default input log path (the tool's historical hardcoded input).
pub const DEFAULT_CSV_PATH: &str = "data/sensor-log.csv";

/// Default 0-indexed column of the x reading.
pub const DEFAULT_X_COL: usize = 2;

/// Default 0-indexed column of the y reading.
pub const DEFAULT_Y_COL: usize = 3;

/// Default x quality floor.
///
/// Rows where the x reading sits below this floor *and* the y reading sits
/// below [`DEFAULT_Y_FLOOR`] are discarded as low-signal. The values are an
/// empirical heuristic inherited from the source logger and have not been
/// confirmed against its documentation; treat them as tunables, not physics.
pub const DEFAULT_X_FLOOR: f64 = 404.0;

/// Default y quality floor. See [`DEFAULT_X_FLOOR`].
pub const DEFAULT_Y_FLOOR: f64 = 1800.0;

/// An accepted observation: one cleaned (x, y) reading pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Row-skip tallies from the cleaning pass.
///
/// Skips are not errors: they are expected filtering outcomes, counted so the
/// `--stats` report can account for every input row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Rows with an empty x or y field.
    pub empty: usize,
    /// Rows whose x or y value was already seen on an accepted row.
    pub duplicate: usize,
    /// Rows with both readings below their quality floors.
    pub low_signal: usize,
}

/// Coefficients of a fitted cubic `y = a·x³ + b·x² + c·x + d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    /// Evaluate the cubic at `x` (Horner form).
    pub fn eval(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Fitted coefficients and their quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub coeffs: Cubic,
    pub quality: FitQuality,
}

/// A per-point fitted result (used for exports and plotting).
#[derive(Debug, Clone)]
pub struct Residual {
    pub point: SamplePoint,
    pub y_fit: f64,
    pub residual: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    /// 0-indexed CSV column of the x reading.
    pub x_col: usize,
    /// 0-indexed CSV column of the y reading.
    pub y_col: usize,
    /// Quality floors; a row is dropped only when *both* readings are below.
    pub x_floor: f64,
    pub y_floor: f64,

    /// Print the dataset/fit summary before the coefficient block.
    pub show_stats: bool,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    /// Input log the curve was fitted from.
    pub source: PathBuf,
    pub coefficients: Cubic,
    pub fit_quality: FitQuality,
    pub grid: CurveGrid,
}

/// Precomputed fitted grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_eval_matches_expanded_form() {
        let c = Cubic {
            a: 2.0,
            b: -3.0,
            c: 4.0,
            d: -5.0,
        };
        for &x in &[-2.5, 0.0, 1.0, 3.75] {
            let expanded = 2.0 * x * x * x - 3.0 * x * x + 4.0 * x - 5.0;
            assert!((c.eval(x) - expanded).abs() < 1e-12);
        }
    }
}
