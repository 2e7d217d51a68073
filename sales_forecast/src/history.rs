//! Daily sales observations and the append-only history they form

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated sales total for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar day
    pub date: NaiveDate,
    /// Sum of all sales on that day.
    ///
    /// Real history is non-negative; ledgers reject negative invoice totals
    /// at load. Predicted amounts appended during recursion are passed through
    /// as the model returns them and may go negative.
    pub amount: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Date-ordered, append-only sequence of daily observations.
///
/// Dates are strictly ascending and unique at all times. The buffer is built
/// fresh for each forecast and only ever extended forward: first with real
/// history, then with each day's prediction as the recursion advances.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    records: Vec<SalesRecord>,
}

impl HistoryBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer sized for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Build a buffer by appending every record in order
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SalesRecord>,
    {
        let records = records.into_iter();
        let mut buffer = Self::with_capacity(records.size_hint().0);
        for record in records {
            buffer.append(record)?;
        }
        Ok(buffer)
    }

    /// Append a record dated strictly after the current last record
    pub fn append(&mut self, record: SalesRecord) -> Result<()> {
        if !record.amount.is_finite() {
            return Err(ForecastError::DataError(format!(
                "Amount for {} is not finite: {}",
                record.date, record.amount
            )));
        }

        if let Some(last) = self.records.last() {
            if record.date <= last.date {
                return Err(ForecastError::OutOfOrder {
                    last: last.date,
                    attempted: record.date,
                });
            }
        }

        self.records.push(record);
        Ok(())
    }

    /// The last `n` amounts in date order, or fewer if the history is shorter
    pub fn tail(&self, n: usize) -> Vec<f64> {
        let start = self.records.len().saturating_sub(n);
        self.records[start..].iter().map(|r| r.amount).collect()
    }

    /// Most recent record
    pub fn last(&self) -> Option<&SalesRecord> {
        self.records.last()
    }

    /// All records in date order
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// All amounts in date order
    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.amount)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
