//! Calibration curve fitting.
//!
//! Responsibilities:
//!
//! - assemble the polynomial design matrix from cleaned points
//! - solve the least-squares system
//! - report fit quality (SSE / RMSE)

pub mod fitter;

pub use fitter::*;
