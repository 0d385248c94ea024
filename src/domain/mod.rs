//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - cleaned observation points (`SamplePoint`) and dataset stats
//! - fit outputs (`Cubic`, `FitResult`, `FitQuality`)
//! - run configuration (`FitConfig`) and its named defaults

pub mod types;

pub use types::*;
