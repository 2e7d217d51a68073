//! Calendar arithmetic for the forecast horizon

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Resolves the month following a request and enumerates its days
#[derive(Debug)]
pub struct DateRangeGenerator;

impl DateRangeGenerator {
    /// The month after `(year, month)`, rolling December into January
    pub fn next_month(year: i32, month: u32) -> Result<(i32, u32)> {
        Self::check_month(month)?;

        if month == 12 {
            let next_year = year.checked_add(1).ok_or_else(|| {
                ForecastError::InvalidParameter(format!("Year {} cannot be advanced", year))
            })?;
            Ok((next_year, 1))
        } else {
            Ok((year, month + 1))
        }
    }

    /// Number of days in the month, leap years included
    pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
        let first = Self::first_day(year, month)?;
        let (next_year, next_month) = Self::next_month(year, month)?;
        let following = Self::first_day(next_year, next_month)?;

        Ok((following - first).num_days() as u32)
    }

    /// Every date of the month in ascending order
    pub fn days(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        let first = Self::first_day(year, month)?;
        let count = Self::days_in_month(year, month)? as usize;

        Ok(first.iter_days().take(count).collect())
    }

    fn first_day(year: i32, month: u32) -> Result<NaiveDate> {
        Self::check_month(month)?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "{}-{:02} is outside the supported calendar range",
                year, month
            ))
        })
    }

    fn check_month(month: u32) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidParameter(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(())
    }
}
