//! Forecast accuracy against realised sales

use crate::engine::MonthlyForecast;
use crate::error::{ForecastError, Result};
use crate::history::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    /// Days present in both forecast and actuals
    pub days: usize,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error over days with non-zero actuals
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl ForecastAccuracy {
    /// Compare forecast points with actual totals on matching dates
    pub fn evaluate(forecast: &MonthlyForecast, actual: &[SalesRecord]) -> Result<Self> {
        let actual_by_date: HashMap<_, _> = actual.iter().map(|r| (r.date, r.amount)).collect();
        let pairs: Vec<(f64, f64)> = forecast
            .predictions
            .iter()
            .filter_map(|p| actual_by_date.get(&p.date).map(|&a| (p.predicted_amount, a)))
            .collect();

        Self::from_pairs(&pairs)
    }

    /// Metrics over `(forecast, actual)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ForecastError::DataError(
                "No overlapping days between forecast and actuals".to_string(),
            ));
        }

        let n = pairs.len() as f64;
        let errors: Vec<f64> = pairs.iter().map(|&(f, a)| a - f).collect();

        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
        let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
        let rmse = mse.sqrt();

        let nonzero: Vec<f64> = pairs
            .iter()
            .filter(|(_, a)| *a != 0.0)
            .map(|&(f, a)| ((a - f).abs() / a.abs()) * 100.0)
            .collect();
        let mape = if nonzero.is_empty() {
            0.0
        } else {
            nonzero.iter().sum::<f64>() / nonzero.len() as f64
        };

        let smape = pairs
            .iter()
            .map(|&(f, a)| {
                let denom = a.abs() + f.abs();
                if denom == 0.0 {
                    0.0
                } else {
                    200.0 * (a - f).abs() / denom
                }
            })
            .sum::<f64>()
            / n;

        Ok(Self {
            days: pairs.len(),
            mae,
            mse,
            rmse,
            mape,
            smape,
        })
    }
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics ({} days):", self.days)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}
