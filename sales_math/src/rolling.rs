//! Trailing window statistics
//!
//! - [`RollingWindow`]: a fixed-capacity window fed one observation at a time
//! - [`WindowStats`]: mean and sample standard deviation of a finished slice

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Mean and sample standard deviation of a window of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl WindowStats {
    /// Compute statistics over every value in `values`.
    ///
    /// The sample standard deviation needs at least two observations.
    pub fn of(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 values for a sample standard deviation, have {}.",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Window contains a non-finite value: {}",
                bad
            )));
        }

        let mean = values.iter().mean();
        // Constant windows can round to a tiny negative variance
        let std_dev = values.iter().std_dev().max(0.0);

        Ok(Self { mean, std_dev })
    }
}

/// Fixed-size trailing window over a stream of observations
#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    /// Create a new window holding at most `period` observations
    pub fn new(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(MathError::InvalidInput(
                "Period must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
        })
    }

    /// Push a new observation, evicting the oldest once the window is full
    pub fn push(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Observation must be finite, got {}",
                value
            )));
        }

        self.values.push_back(value);
        if self.values.len() > self.period {
            self.values.pop_front();
        }

        Ok(())
    }

    /// Whether the window holds `period` observations
    pub fn is_full(&self) -> bool {
        self.values.len() == self.period
    }

    /// Number of observations currently held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the configured period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Statistics over the full window
    pub fn stats(&self) -> Result<WindowStats> {
        if !self.is_full() {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for window statistics. Need {} values, have {}.",
                self.period,
                self.values.len()
            )));
        }

        let (front, back) = self.values.as_slices();
        if back.is_empty() {
            WindowStats::of(front)
        } else {
            let contiguous: Vec<f64> = self.values.iter().copied().collect();
            WindowStats::of(&contiguous)
        }
    }

    /// Clear all observations
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = RollingWindow::new(3).unwrap();
        for v in [1.0, 2.0, 3.0, 4.0] {
            window.push(v).unwrap();
        }

        assert!(window.is_full());
        let stats = window.stats().unwrap();
        assert_relative_eq!(stats.mean, 3.0);
        assert_relative_eq!(stats.std_dev, 1.0);
    }

    #[test]
    fn test_partial_window_has_no_stats() {
        let mut window = RollingWindow::new(7).unwrap();
        for v in 0..6 {
            window.push(v as f64).unwrap();
        }

        assert!(!window.is_full());
        assert!(matches!(
            window.stats(),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut window = RollingWindow::new(2).unwrap();
        window.push(5.0).unwrap();
        window.reset();
        assert!(window.is_empty());
    }
}
