//! Feature rows fed to the regression model
//!
//! Every row carries the same six fields, always addressed by name:
//! `[dayofweek, month, day, lag1, rolling_mean7, rolling_std7]`.

use crate::error::{ForecastError, Result, MIN_FEATURE_ROWS};
use crate::history::HistoryBuffer;
use chrono::{Datelike, NaiveDate};
use sales_math::{RollingWindow, WindowStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the trailing window behind the rolling features
pub const WINDOW: usize = 7;

/// One column of the model's input schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "dayofweek")]
    DayOfWeek,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "lag1")]
    Lag1,
    #[serde(rename = "rolling_mean7")]
    RollingMean7,
    #[serde(rename = "rolling_std7")]
    RollingStd7,
}

impl Feature {
    /// Column order the model artifacts were trained with
    pub const SCHEMA: [Feature; 6] = [
        Feature::DayOfWeek,
        Feature::Month,
        Feature::Day,
        Feature::Lag1,
        Feature::RollingMean7,
        Feature::RollingStd7,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::DayOfWeek => "dayofweek",
            Feature::Month => "month",
            Feature::Day => "day",
            Feature::Lag1 => "lag1",
            Feature::RollingMean7 => "rolling_mean7",
            Feature::RollingStd7 => "rolling_std7",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model input for a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Day of week, Monday = 0
    pub dayofweek: u32,
    /// Month, 1-12
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// Amount of the previous day
    pub lag1: f64,
    /// Mean of the trailing window
    pub rolling_mean7: f64,
    /// Sample standard deviation of the trailing window
    pub rolling_std7: f64,
}

impl FeatureRow {
    /// Assemble a row from a date's calendar fields and trend statistics
    pub fn new(date: NaiveDate, lag1: f64, window: WindowStats) -> Self {
        Self {
            dayofweek: date.weekday().num_days_from_monday(),
            month: date.month(),
            day: date.day(),
            lag1,
            rolling_mean7: window.mean,
            rolling_std7: window.std_dev,
        }
    }

    /// Value of a named column
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::DayOfWeek => self.dayofweek as f64,
            Feature::Month => self.month as f64,
            Feature::Day => self.day as f64,
            Feature::Lag1 => self.lag1,
            Feature::RollingMean7 => self.rolling_mean7,
            Feature::RollingStd7 => self.rolling_std7,
        }
    }
}

/// Derives feature rows from a history buffer
#[derive(Debug)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// One row per date whose inclusive 7-day window is fully populated.
    ///
    /// The window counts entries, not calendar days: `lag1` is the previous
    /// entry's amount however many days back it lies, and the rolling
    /// statistics cover the current entry and the six before it. Rows before
    /// the window fills are dropped, never zero-filled.
    pub fn build(history: &HistoryBuffer) -> Result<Vec<FeatureRow>> {
        let mut window = RollingWindow::new(WINDOW)?;
        let mut previous: Option<f64> = None;
        let mut rows = Vec::with_capacity(history.len().saturating_sub(WINDOW - 1));

        for record in history.records() {
            window.push(record.amount)?;
            if let (true, Some(lag1)) = (window.is_full(), previous) {
                rows.push(FeatureRow::new(record.date, lag1, window.stats()?));
            }
            previous = Some(record.amount);
        }

        Ok(rows)
    }

    /// Build rows and reject histories with fewer than 14 usable rows
    pub fn validate(history: &HistoryBuffer) -> Result<Vec<FeatureRow>> {
        let rows = Self::build(history)?;
        if rows.len() < MIN_FEATURE_ROWS {
            return Err(ForecastError::InsufficientHistory {
                usable: rows.len(),
                required: MIN_FEATURE_ROWS,
            });
        }
        Ok(rows)
    }

    /// Row for `date`, the day right after the end of `history`.
    ///
    /// Unlike [`FeatureBuilder::build`], the window here is the seven most
    /// recent entries before `date`, since `date` itself has no amount yet.
    pub fn next_row(history: &HistoryBuffer, date: NaiveDate) -> Result<FeatureRow> {
        let lag1 = history
            .last()
            .map(|r| r.amount)
            .ok_or_else(|| ForecastError::DataError("History is empty".to_string()))?;

        let tail = history.tail(WINDOW);
        if tail.len() < WINDOW {
            return Err(ForecastError::DataError(format!(
                "Trailing window needs {} days, history has {}",
                WINDOW,
                tail.len()
            )));
        }

        Ok(FeatureRow::new(date, lag1, WindowStats::of(&tail)?))
    }
}
