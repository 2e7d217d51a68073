//! The regression capability behind the forecast
//!
//! A [`Predictor`] maps one [`FeatureRow`] to one predicted daily total. The
//! engine only ever talks to this trait; trained artifacts live in
//! [`crate::models`], and the stubs below drive tests without any artifact.

use crate::error::{ForecastError, Result};
use crate::features::FeatureRow;
use std::fmt::{self, Debug};

/// Stateless scalar regression over a feature row.
///
/// Implementations are shared read-only across concurrent forecasts.
pub trait Predictor: Debug + Send + Sync {
    /// Predict the total for the day described by `row`
    fn predict(&self, row: &FeatureRow) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Invoke `predictor` and reject NaN or infinite output
pub fn checked_predict(predictor: &dyn Predictor, row: &FeatureRow) -> Result<f64> {
    let value = predictor.predict(row)?;
    if !value.is_finite() {
        return Err(ForecastError::Prediction(format!(
            "{} returned a non-finite value ({})",
            predictor.name(),
            value
        )));
    }
    Ok(value)
}

/// Always predicts the same value
#[derive(Debug, Clone)]
pub struct ConstantPredictor {
    value: f64,
}

impl ConstantPredictor {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Predictor for ConstantPredictor {
    fn predict(&self, _row: &FeatureRow) -> Result<f64> {
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Predicts with an arbitrary closure over the row
pub struct FnPredictor<F> {
    name: String,
    f: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&FeatureRow) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Debug for FnPredictor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredictor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&FeatureRow) -> f64 + Send + Sync,
{
    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        Ok((self.f)(row))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
