//! # Sales Forecast Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`forecast`]: history buffer, feature rows, model artifacts and the
//!   recursive monthly forecast engine
//! - [`math`]: rolling-window statistics
//!
//! ## Example
//!
//! ```
//! use sales_forecast_workspace::forecast::DateRangeGenerator;
//!
//! assert_eq!(DateRangeGenerator::next_month(2023, 12).unwrap(), (2024, 1));
//! assert_eq!(DateRangeGenerator::days_in_month(2024, 2).unwrap(), 29);
//! ```

pub use sales_forecast as forecast;
pub use sales_math as math;
