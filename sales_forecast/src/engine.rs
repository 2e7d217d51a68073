//! Day-by-day autoregressive forecasting
//!
//! A forecast moves through three states:
//!
//! 1. **Validate** ([`ForecastEngine::prepare`]): the requested month's history
//!    is non-empty, ordered, and yields at least 14 usable feature rows.
//! 2. **Recurse** ([`ForecastEngine::run`]): for each day of the following
//!    month, build a row from the current buffer, predict, append the
//!    prediction to the buffer and emit a point.
//! 3. **Done**: the ordered points and the resolved month.
//!
//! Any failure aborts the whole forecast. A truncated month is never returned,
//! since every later day would be built on the failed one.

use crate::calendar::DateRangeGenerator;
use crate::error::{ForecastError, Result};
use crate::features::FeatureBuilder;
use crate::history::{HistoryBuffer, SalesRecord};
use crate::predictor::{checked_predict, Predictor};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Upper bound on recursion steps for one forecast
pub const MAX_HORIZON_DAYS: usize = 31;

/// One forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Predicted total rounded to 2 decimals
    pub predicted_amount: f64,
}

impl ForecastPoint {
    /// Create a point, rounding the raw prediction to cents
    pub fn new(date: NaiveDate, prediction: f64) -> Self {
        Self {
            date,
            predicted_amount: round_cents(prediction),
        }
    }
}

/// A full month of forecasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// Resolved target year
    pub year: i32,
    /// Resolved target month
    pub month: u32,
    /// One point per day of the target month, ascending
    pub predictions: Vec<ForecastPoint>,
}

/// History that passed validation, ready for recursion
#[derive(Debug, Clone)]
pub struct PreparedForecast {
    buffer: HistoryBuffer,
    target_year: i32,
    target_month: u32,
}

impl PreparedForecast {
    /// The month that will be forecast
    pub fn target(&self) -> (i32, u32) {
        (self.target_year, self.target_month)
    }

    /// Validated history the recursion starts from
    pub fn history(&self) -> &HistoryBuffer {
        &self.buffer
    }
}

/// Tunables for a forecast run
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineSettings {
    /// Wall-clock budget for the recursion
    pub timeout: Option<Duration>,
}

/// Runs the recursion against a shared predictor
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    predictor: Arc<dyn Predictor>,
    settings: EngineSettings,
}

impl ForecastEngine {
    /// Create an engine over a loaded predictor
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            settings: EngineSettings::default(),
        }
    }

    /// Create an engine with explicit settings
    pub fn with_settings(predictor: Arc<dyn Predictor>, settings: EngineSettings) -> Self {
        Self {
            predictor,
            settings,
        }
    }

    /// The predictor this engine calls
    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    /// Validate the history of `(year, month)` and resolve the month after it.
    ///
    /// `history` must be aggregated per date and in ascending date order.
    pub fn prepare(year: i32, month: u32, history: Vec<SalesRecord>) -> Result<PreparedForecast> {
        let (target_year, target_month) = DateRangeGenerator::next_month(year, month)?;

        if history.is_empty() {
            return Err(ForecastError::DataNotFound { year, month });
        }

        let buffer = HistoryBuffer::from_records(history)?;
        let rows = FeatureBuilder::validate(&buffer)?;
        debug!(
            history_days = buffer.len(),
            usable_rows = rows.len(),
            "history validated"
        );

        Ok(PreparedForecast {
            buffer,
            target_year,
            target_month,
        })
    }

    /// Validate and forecast the month after `(year, month)`
    #[instrument(skip(self, history), fields(model = self.predictor.name()))]
    pub fn forecast_next_month(
        &self,
        year: i32,
        month: u32,
        history: Vec<SalesRecord>,
    ) -> Result<MonthlyForecast> {
        let prepared = Self::prepare(year, month, history)?;
        self.run(prepared)
    }

    /// Recurse over every day of the prepared target month
    pub fn run(&self, prepared: PreparedForecast) -> Result<MonthlyForecast> {
        let PreparedForecast {
            mut buffer,
            target_year,
            target_month,
        } = prepared;

        let dates = DateRangeGenerator::days(target_year, target_month)?;
        if dates.len() > MAX_HORIZON_DAYS {
            return Err(ForecastError::InvalidParameter(format!(
                "Horizon of {} days exceeds {}",
                dates.len(),
                MAX_HORIZON_DAYS
            )));
        }

        let started = Instant::now();
        let mut predictions = Vec::with_capacity(dates.len());

        for date in dates {
            if let Some(limit) = self.settings.timeout {
                let elapsed = started.elapsed();
                if elapsed > limit {
                    return Err(ForecastError::Timeout {
                        elapsed_ms: elapsed.as_millis(),
                    });
                }
            }

            let row = FeatureBuilder::next_row(&buffer, date)?;
            let prediction = checked_predict(self.predictor.as_ref(), &row)?;
            buffer.append(SalesRecord::new(date, prediction))?;

            debug!(
                %date,
                lag1 = row.lag1,
                rolling_mean7 = row.rolling_mean7,
                rolling_std7 = row.rolling_std7,
                prediction,
                "forecast step"
            );
            predictions.push(ForecastPoint::new(date, prediction));
        }

        info!(
            year = target_year,
            month = target_month,
            days = predictions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forecast complete"
        );

        Ok(MonthlyForecast {
            year: target_year,
            month: target_month,
            predictions,
        })
    }
}

/// Round the exact binary value to 2 decimals, ties to even.
///
/// The cents are converted back with a single division so the result is the
/// nearest `f64` to the rounded decimal.
fn round_cents(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
            cents.mantissa() as f64 / 10f64.powi(cents.scale() as i32)
        }
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1234.5678), 1234.57);
        assert_eq!(round_cents(-0.004), -0.0);
        assert_eq!(round_cents(10.0), 10.0);
    }

    #[test]
    fn test_round_cents_ties_to_even_on_exact_value() {
        // 0.125 and 0.375 are exact binary ties
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
        // 2.675 is stored just below the tie
        assert_eq!(round_cents(2.675), 2.67);
        assert_eq!(round_cents(1234.565), 1234.57);
        assert_eq!(round_cents(0.005), 0.01);
        assert_eq!(round_cents(-2.675), -2.67);
    }
}
