//! # Sales Math
//!
//! Window statistics for daily sales series.
//! This crate provides the trailing-window mean and sample standard deviation
//! used to derive trend features from a history of daily totals.

use thiserror::Error;

pub mod rolling;

pub use rolling::{RollingWindow, WindowStats};

/// Errors that can occur in window calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for sales math operations
pub type Result<T> = std::result::Result<T, MathError>;
