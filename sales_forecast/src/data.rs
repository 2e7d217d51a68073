//! Invoice storage and per-day aggregation
//!
//! The forecaster never owns sales records. It reads daily totals through a
//! [`HistorySource`]; [`InvoiceLedger`] is the bundled implementation, backed
//! by a polars DataFrame loaded from CSV or built in memory.

use crate::error::{ForecastError, Result};
use crate::history::SalesRecord;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Canonical date column, `YYYY-MM-DD` strings
pub const DATE_COLUMN: &str = "date";
/// Canonical invoice total column
pub const TOTAL_COLUMN: &str = "total";

/// Supplier of aggregated daily totals for a month
pub trait HistorySource {
    /// One record per date with sales in `(year, month)`, ascending.
    ///
    /// An empty vector means the month has no sales.
    fn daily_totals(&self, year: i32, month: u32) -> Result<Vec<SalesRecord>>;
}

impl HistorySource for [SalesRecord] {
    fn daily_totals(&self, year: i32, month: u32) -> Result<Vec<SalesRecord>> {
        use chrono::Datelike;
        Ok(self
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .copied()
            .collect())
    }
}

impl HistorySource for Vec<SalesRecord> {
    fn daily_totals(&self, year: i32, month: u32) -> Result<Vec<SalesRecord>> {
        self.as_slice().daily_totals(year, month)
    }
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn daily_totals(&self, year: i32, month: u32) -> Result<Vec<SalesRecord>> {
        (**self).daily_totals(year, month)
    }
}

/// A single stored invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice code
    pub code: String,
    /// Issue date
    pub date: NaiveDate,
    /// Invoice total
    pub total: f64,
}

impl Invoice {
    pub fn new(code: impl Into<String>, date: NaiveDate, total: f64) -> Self {
        Self {
            code: code.into(),
            date,
            total,
        }
    }
}

/// Invoices held as a `date`/`total` DataFrame
#[derive(Debug, Clone)]
pub struct InvoiceLedger {
    df: DataFrame,
}

/// Loader for invoice files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load invoices from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<InvoiceLedger> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        InvoiceLedger::from_dataframe(df)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        Self::detect_column(df, &["date", "fecha"]).ok_or_else(|| {
            ForecastError::DataError("No date column found in invoice data".to_string())
        })
    }

    /// Detect the invoice total column in a DataFrame
    fn detect_total_column(df: &DataFrame) -> Result<String> {
        Self::detect_column(df, &["total", "amount"]).ok_or_else(|| {
            ForecastError::DataError("No total column found in invoice data".to_string())
        })
    }

    /// Prefer names starting with a needle (`total_fac` over `subtotal`),
    /// then names merely containing one
    fn detect_column(df: &DataFrame, needles: &[&str]) -> Option<String> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_lowercase())
            .collect();

        let position = names
            .iter()
            .position(|name| needles.iter().any(|needle| name.starts_with(needle)))
            .or_else(|| {
                names
                    .iter()
                    .position(|name| needles.iter().any(|needle| name.contains(needle)))
            })?;

        df.get_column_names()
            .get(position)
            .map(|name| name.to_string())
    }
}

impl InvoiceLedger {
    /// Normalise an arbitrary invoice DataFrame to the canonical columns.
    ///
    /// Date values may carry a time suffix; only the calendar day is kept.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let date_column = DataLoader::detect_date_column(&df)?;
        let total_column = DataLoader::detect_total_column(&df)?;

        let raw_dates = df.column(&date_column)?.cast(&DataType::Utf8)?;
        let raw_totals = df.column(&total_column)?.cast(&DataType::Float64)?;

        let mut dates = Vec::with_capacity(df.height());
        let mut totals = Vec::with_capacity(df.height());
        for (i, (date, total)) in raw_dates
            .utf8()?
            .into_iter()
            .zip(raw_totals.f64()?.into_iter())
            .enumerate()
        {
            match (date, total) {
                (Some(_), Some(total)) if total < 0.0 => {
                    return Err(ForecastError::DataError(format!(
                        "Invoice row {} has a negative total {}",
                        i, total
                    )))
                }
                (Some(date), Some(total)) if total.is_finite() => {
                    dates.push(parse_date(date)?);
                    totals.push(total);
                }
                _ => {
                    return Err(ForecastError::DataError(format!(
                        "Invoice row {} has a missing or invalid date/total",
                        i
                    )))
                }
            }
        }

        Self::from_columns(&dates, totals)
    }

    /// Build a ledger from in-memory invoices
    pub fn from_invoices(invoices: &[Invoice]) -> Result<Self> {
        let dates: Vec<NaiveDate> = invoices.iter().map(|i| i.date).collect();
        let totals: Vec<f64> = invoices.iter().map(|i| i.total).collect();
        if let Some(bad) = invoices.iter().find(|i| !i.total.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Invoice {} has a non-finite total",
                bad.code
            )));
        }
        if let Some(bad) = invoices.iter().find(|i| i.total < 0.0) {
            return Err(ForecastError::DataError(format!(
                "Invoice {} has a negative total {}",
                bad.code, bad.total
            )));
        }
        Self::from_columns(&dates, totals)
    }

    fn from_columns(dates: &[NaiveDate], totals: Vec<f64>) -> Result<Self> {
        let dates: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        let df = DataFrame::new(vec![
            Series::new(DATE_COLUMN, dates),
            Series::new(TOTAL_COLUMN, totals),
        ])?;
        Ok(Self { df })
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of invoices
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Daily totals across the whole ledger
    pub fn all_daily_totals(&self) -> Result<Vec<SalesRecord>> {
        aggregate_by_date(self.df.clone())
    }
}

impl HistorySource for InvoiceLedger {
    fn daily_totals(&self, year: i32, month: u32) -> Result<Vec<SalesRecord>> {
        let prefix = format!("{:04}-{:02}-", year, month);
        let mask: BooleanChunked = self
            .df
            .column(DATE_COLUMN)?
            .utf8()?
            .into_iter()
            .map(|date| date.map(|d| d.starts_with(&prefix)))
            .collect();

        let month_df = self.df.filter(&mask)?;
        debug!(year, month, invoices = month_df.height(), "selected invoices");
        aggregate_by_date(month_df)
    }
}

/// Sum invoice totals per date, ascending by date
fn aggregate_by_date(df: DataFrame) -> Result<Vec<SalesRecord>> {
    let grouped = df
        .lazy()
        .groupby([col(DATE_COLUMN)])
        .agg([col(TOTAL_COLUMN).sum()])
        .sort(DATE_COLUMN, SortOptions::default())
        .collect()?;

    let dates = grouped.column(DATE_COLUMN)?.utf8()?;
    let totals = grouped.column(TOTAL_COLUMN)?.f64()?;

    dates
        .into_iter()
        .zip(totals.into_iter())
        .map(|(date, total)| match (date, total) {
            (Some(date), Some(total)) => Ok(SalesRecord::new(parse_date(date)?, total)),
            _ => Err(ForecastError::DataError(
                "Aggregated ledger contains an empty date or total".to_string(),
            )),
        })
        .collect()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| ForecastError::DataError(format!("Invalid invoice date '{}': {}", raw, e)))
}
