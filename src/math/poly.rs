//! Polynomial basis rows and evaluation.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given x (for OLS)
//! - evaluate the polynomial at x given its coefficients (for residuals/plots)
//!
//! Coefficients are kept in descending-power order throughout, matching the
//! reported form `y = a·x³ + b·x² + c·x + d`.

/// Fill a design row with descending powers of `x`.
///
/// For `degree = 3` the row is `[x³, x², x, 1]`, lining up with coefficient
/// order `[a, b, c, d]`.
///
/// # Panics
/// Panics if `out` does not have length `degree + 1`. Callers should size the
/// row correctly.
pub fn fill_design_row(x: f64, degree: usize, out: &mut [f64]) {
    assert_eq!(out.len(), degree + 1);
    let mut p = 1.0;
    for j in (0..=degree).rev() {
        out[j] = p;
        p *= x;
    }
}

/// Evaluate a polynomial with descending-power coefficients at `x` (Horner form).
pub fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_is_descending_powers() {
        let mut row = [0.0; 4];
        fill_design_row(2.0, 3, &mut row);
        assert_eq!(row, [8.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn design_row_constant_term_at_zero() {
        let mut row = [0.0; 4];
        fill_design_row(0.0, 3, &mut row);
        assert_eq!(row, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn horner_matches_naive_powers() {
        let coeffs = [2.0, -3.0, 4.0, -5.0];
        for &x in &[-1.5f64, 0.0, 0.1, 7.0] {
            let naive = 2.0 * x.powi(3) - 3.0 * x.powi(2) + 4.0 * x - 5.0;
            assert!((eval(&coeffs, x) - naive).abs() < 1e-9);
        }
    }
}
