//! Reporting utilities: residuals and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{FitResult, Residual, SamplePoint};
use crate::error::AppError;
use crate::io::ingest::IngestedData;

/// Compute fitted values and residuals for each point.
pub fn compute_residuals(
    points: &[SamplePoint],
    fit: &FitResult,
) -> Result<Vec<Residual>, AppError> {
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        let y_fit = fit.coeffs.eval(p.x);
        if !y_fit.is_finite() {
            return Err(AppError::internal(
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(Residual {
            point: *p,
            y_fit,
            residual: p.y - y_fit,
        });
    }
    Ok(out)
}

/// Format the fitted coefficients.
///
/// The layout is fixed: one banner line naming the model form, then one line
/// per coefficient using the default `f64` display. Downstream scripts parse
/// this block, so it carries no extra decoration.
pub fn format_coefficients(fit: &FitResult) -> String {
    let c = &fit.coeffs;
    format!(
        "y=ax³+bx²+cx+d\na = {}\nb = {}\nc = {}\nd = {}",
        c.a, c.b, c.c, c.d
    )
}

/// Format the dataset/fit summary shown by `--stats`.
pub fn format_summary(ingest: &IngestedData, fit: &FitResult) -> String {
    let mut out = String::new();

    out.push_str("=== calfit - cubic calibration fit ===\n");
    out.push_str(&format!(
        "Rows: read={} | accepted={} | skipped: empty={} duplicate={} low-signal={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.skipped.empty,
        ingest.skipped.duplicate,
        ingest.skipped.low_signal,
    ));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        ingest.stats.n_points,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.y_min,
        ingest.stats.y_max,
    ));
    out.push_str(&format!(
        "Fit: SSE={:.6} RMSE={:.6} (n={})\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.n,
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cubic, DatasetStats, FitQuality, SkipCounts};

    fn fit_with(a: f64, b: f64, c: f64, d: f64) -> FitResult {
        FitResult {
            coeffs: Cubic { a, b, c, d },
            quality: FitQuality {
                sse: 0.0,
                rmse: 0.0,
                n: 0,
            },
        }
    }

    #[test]
    fn coefficient_block_layout_is_fixed() {
        let fit = fit_with(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            format_coefficients(&fit),
            "y=ax³+bx²+cx+d\na = 1\nb = 2\nc = 3\nd = 4"
        );
    }

    #[test]
    fn coefficient_block_uses_default_float_display() {
        let fit = fit_with(-0.5, 1e-7, 1234.25, -5.0);
        let block = format_coefficients(&fit);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], format!("a = {}", -0.5_f64));
        assert_eq!(lines[2], format!("b = {}", 1e-7_f64));
        assert_eq!(lines[3], format!("c = {}", 1234.25_f64));
        assert_eq!(lines[4], format!("d = {}", -5.0_f64));
    }

    #[test]
    fn compute_residuals_basic() {
        let fit = fit_with(0.0, 0.0, 1.0, 0.0); // y = x
        let points = vec![
            SamplePoint { x: 1.0, y: 1.0 },
            SamplePoint { x: 2.0, y: 3.0 },
        ];

        let residuals = compute_residuals(&points, &fit).unwrap();
        assert_eq!(residuals.len(), 2);
        assert!((residuals[0].residual - 0.0).abs() < 1e-12);
        assert!((residuals[1].residual - 1.0).abs() < 1e-12);
    }

    #[test]
    fn summary_accounts_for_every_row() {
        let ingest = IngestedData {
            points: vec![SamplePoint { x: 500.0, y: 2000.0 }],
            stats: DatasetStats {
                n_points: 1,
                x_min: 500.0,
                x_max: 500.0,
                y_min: 2000.0,
                y_max: 2000.0,
            },
            rows_read: 4,
            rows_used: 1,
            skipped: SkipCounts {
                empty: 1,
                duplicate: 1,
                low_signal: 1,
            },
        };
        let summary = format_summary(&ingest, &fit_with(0.0, 0.0, 0.0, 2000.0));
        assert!(summary.contains("read=4"));
        assert!(summary.contains("accepted=1"));
        assert!(summary.contains("duplicate=1"));
    }
}
