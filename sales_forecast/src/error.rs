//! Error types for the sales_forecast crate

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use sales_math::MathError;
use thiserror::Error;

/// Minimum number of usable feature rows required before recursion starts
pub const MIN_FEATURE_ROWS: usize = 14;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No observations exist for the requested month
    #[error("No sales found for {year}-{month:02}")]
    DataNotFound { year: i32, month: u32 },

    /// Too few usable feature rows after dropping incomplete windows
    #[error("Insufficient history: {usable} usable days, at least {required} required")]
    InsufficientHistory { usable: usize, required: usize },

    /// History buffer append that does not extend the series forward
    #[error("Out-of-order record: {attempted} does not follow {last}")]
    OutOfOrder { last: NaiveDate, attempted: NaiveDate },

    /// Model artifact missing, unreadable or incompatible
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// A single inference call failed or returned an invalid value
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Forecast exceeded its wall-clock budget
    #[error("Forecast timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u128 },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error in configuration files
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from window statistics
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl ForecastError {
    /// HTTP-style status code reported to callers
    pub fn status(&self) -> u16 {
        match self {
            ForecastError::DataNotFound { .. } => 404,
            ForecastError::InsufficientHistory { .. } | ForecastError::InvalidParameter(_) => 400,
            _ => 500,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::DataNotFound { .. } => "DATA_NOT_FOUND",
            ForecastError::InsufficientHistory { .. } => "INSUFFICIENT_HISTORY",
            ForecastError::InvalidParameter(_) => "INVALID_PARAMETER",
            ForecastError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            ForecastError::Prediction(_) => "PREDICTION_FAILED",
            ForecastError::Timeout { .. } => "TIMEOUT",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand to a caller.
    ///
    /// Internal errors never carry artifact paths or low-level causes.
    pub fn public_message(&self) -> String {
        match self {
            ForecastError::DataNotFound { year, month } => {
                format!("No sales found for {}-{:02}", year, month)
            }
            ForecastError::InsufficientHistory { required, .. } => format!(
                "Insufficient data to forecast the next month (minimum {} usable days)",
                required
            ),
            ForecastError::InvalidParameter(msg) => msg.clone(),
            ForecastError::ModelUnavailable(_) => "Forecast model is not available".to_string(),
            ForecastError::Prediction(_) => "Forecast model failed to produce a prediction".to_string(),
            ForecastError::Timeout { .. } => "Forecast did not complete in time".to_string(),
            _ => "Internal forecasting error".to_string(),
        }
    }
}
