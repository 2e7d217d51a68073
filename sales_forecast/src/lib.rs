//! # Sales Forecast
//!
//! Recursive one-step-ahead forecasting of daily sales totals.
//!
//! Given the aggregated daily totals of one month, the crate forecasts every
//! day of the following month: each day's calendar fields, previous amount
//! and trailing 7-day statistics go through a pre-trained regression model,
//! and the prediction is appended to the history that the next day is built
//! from.
//!
//! ## Features
//!
//! - Append-only history buffer with strict date ordering
//! - Calendar-aware horizon (year rollover, leap years)
//! - Lag and rolling-window feature rows addressed by name
//! - Versioned JSON model artifacts (linear, boosted trees)
//! - Invoice ledger with per-day aggregation via polars
//! - Accuracy metrics against realised sales
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_forecast::data::DataLoader;
//! use sales_forecast::engine::EngineSettings;
//! use sales_forecast::service::ForecastService;
//!
//! let ledger = DataLoader::from_csv("invoices.csv")?;
//! let service = ForecastService::from_artifact(ledger, "sales_model.json", EngineSettings::default());
//!
//! // Forecast February 2023 from January 2023
//! let forecast = service.forecast(2023, 1)?;
//! assert_eq!(forecast.predictions.len(), 28);
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod features;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod predictor;
pub mod service;

// Re-export commonly used types
pub use crate::calendar::DateRangeGenerator;
pub use crate::data::{DataLoader, HistorySource, Invoice, InvoiceLedger};
pub use crate::engine::{ForecastEngine, ForecastPoint, MonthlyForecast};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{Feature, FeatureBuilder, FeatureRow};
pub use crate::history::{HistoryBuffer, SalesRecord};
pub use crate::models::ModelPredictor;
pub use crate::predictor::Predictor;
pub use crate::service::{ForecastResponse, ForecastService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
