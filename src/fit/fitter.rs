//! Least-squares fitting of the calibration cubic.
//!
//! Given:
//! - cleaned points `(x_i, y_i)`, sorted and pairwise distinct in x
//!
//! we solve a single ordinary least squares problem for the descending-power
//! coefficients of `y = a·x³ + b·x² + c·x + d`.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Cubic, FitQuality, FitResult, SamplePoint};
use crate::error::AppError;
use crate::math::{eval, fill_design_row, solve_least_squares};

/// Polynomial degree of the calibration model.
const DEGREE: usize = 3;

/// Fit the calibration cubic to the cleaned dataset.
///
/// Fails when fewer than four points are available (underdetermined) or when
/// the design matrix is too ill-conditioned for a stable solve.
pub fn fit_cubic(points: &[SamplePoint]) -> Result<FitResult, AppError> {
    let coeffs = fit_poly(points, DEGREE)?;
    let quality = quality_of(points, &coeffs);
    Ok(FitResult {
        coeffs: Cubic {
            a: coeffs[0],
            b: coeffs[1],
            c: coeffs[2],
            d: coeffs[3],
        },
        quality,
    })
}

/// Fit a polynomial of the given degree, returning descending-power coefficients.
///
/// Callers are expected to pass pairwise-distinct x values (the ingest screen
/// guarantees this); repeated xs weaken the system but are not rejected here.
fn fit_poly(points: &[SamplePoint], degree: usize) -> Result<Vec<f64>, AppError> {
    let n = points.len();
    let p = degree + 1;

    if n < p {
        return Err(AppError::data(format!(
            "Need at least {p} distinct points for a degree-{degree} fit, got {n}."
        )));
    }
    if points
        .iter()
        .any(|pt| !pt.x.is_finite() || !pt.y.is_finite())
    {
        return Err(AppError::data("Non-finite reading in fit input."));
    }

    let mut xmat = DMatrix::<f64>::zeros(n, p);
    let yvec = DVector::<f64>::from_iterator(n, points.iter().map(|pt| pt.y));
    let mut row = vec![0.0; p];

    for (i, pt) in points.iter().enumerate() {
        fill_design_row(pt.x, degree, &mut row);
        for j in 0..p {
            xmat[(i, j)] = row[j];
        }
    }

    // Equilibrate column norms before the solve. Raw x readings around 10³ put
    // roughly nine orders of magnitude between the x³ column and the constant
    // column, which wrecks the singular-value tolerance checks.
    let scales: Vec<f64> = (0..p)
        .map(|j| {
            let norm = xmat.column(j).norm();
            if norm > 0.0 { norm } else { 1.0 }
        })
        .collect();
    for j in 0..p {
        for i in 0..n {
            xmat[(i, j)] /= scales[j];
        }
    }

    let beta = solve_least_squares(&xmat, &yvec).ok_or_else(|| {
        AppError::internal("Least-squares solve failed: design matrix is too ill-conditioned.")
    })?;

    // Undo the column scaling to recover coefficients in raw-x units.
    Ok(beta
        .iter()
        .zip(scales.iter())
        .map(|(b, s)| b / s)
        .collect())
}

fn quality_of(points: &[SamplePoint], coeffs: &[f64]) -> FitQuality {
    let n = points.len();
    let mut sse = 0.0;
    for pt in points {
        let r = pt.y - eval(coeffs, pt.x);
        sse += r * r;
    }
    FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        n,
    }
}
