//! Request-level forecasting: history lookup, model slot and response shape

use crate::data::HistorySource;
use crate::engine::{EngineSettings, ForecastEngine, ForecastPoint, MonthlyForecast};
use crate::error::{ForecastError, Result};
use crate::models::ModelPredictor;
use crate::predictor::Predictor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Error details carried by a failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Body returned to callers for a forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// HTTP-style status code
    #[serde(skip)]
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Empty whenever the request failed
    pub predictions: Vec<ForecastPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ForecastResponse {
    pub fn ok(forecast: MonthlyForecast) -> Self {
        Self {
            status: 200,
            year: Some(forecast.year),
            month: Some(forecast.month),
            predictions: forecast.predictions,
            error: None,
        }
    }

    pub fn from_error(err: &ForecastError) -> Self {
        Self {
            status: err.status(),
            year: None,
            month: None,
            predictions: Vec::new(),
            error: Some(ErrorBody {
                code: err.code().to_string(),
                message: err.public_message(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<MonthlyForecast>> for ForecastResponse {
    fn from(result: Result<MonthlyForecast>) -> Self {
        match result {
            Ok(forecast) => Self::ok(forecast),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Model state fixed at startup
#[derive(Debug, Clone)]
enum ModelSlot {
    Ready(ForecastEngine),
    Unavailable(String),
}

/// Serves forecasts for any requested month.
///
/// The model is resolved once when the service is built and is read-only for
/// the rest of the process; each request gets its own history buffer, so one
/// service can be shared across threads.
#[derive(Debug, Clone)]
pub struct ForecastService<S> {
    source: S,
    model: ModelSlot,
}

impl<S: HistorySource> ForecastService<S> {
    /// Serve with an already loaded predictor
    pub fn new(source: S, predictor: Arc<dyn Predictor>) -> Self {
        Self::with_settings(source, predictor, EngineSettings::default())
    }

    /// Serve with an already loaded predictor and explicit engine settings
    pub fn with_settings(source: S, predictor: Arc<dyn Predictor>, settings: EngineSettings) -> Self {
        Self {
            source,
            model: ModelSlot::Ready(ForecastEngine::with_settings(predictor, settings)),
        }
    }

    /// Load the model artifact at `path`.
    ///
    /// A missing or broken artifact does not prevent startup: every forecast
    /// request then fails with [`ForecastError::ModelUnavailable`].
    pub fn from_artifact<P: AsRef<Path>>(source: S, path: P, settings: EngineSettings) -> Self {
        match ModelPredictor::load(path) {
            Ok(predictor) => Self::with_settings(source, Arc::new(predictor), settings),
            Err(err) => {
                warn!(error = %err, "forecast model failed to load");
                Self {
                    source,
                    model: ModelSlot::Unavailable(err.to_string()),
                }
            }
        }
    }

    /// Whether a model is loaded
    pub fn model_ready(&self) -> bool {
        matches!(self.model, ModelSlot::Ready(_))
    }

    /// Forecast the month after `(year, month)`.
    ///
    /// History is validated before the model is consulted, so data problems
    /// are reported even when no model is loaded.
    #[instrument(skip(self))]
    pub fn forecast(&self, year: i32, month: u32) -> Result<MonthlyForecast> {
        let history = self.source.daily_totals(year, month)?;
        info!(days = history.len(), "history loaded");

        let prepared = ForecastEngine::prepare(year, month, history)?;
        match &self.model {
            ModelSlot::Ready(engine) => engine.run(prepared),
            ModelSlot::Unavailable(reason) => Err(ForecastError::ModelUnavailable(reason.clone())),
        }
    }

    /// Forecast and map the outcome to the response shape
    pub fn respond(&self, year: i32, month: u32) -> ForecastResponse {
        let result = self.forecast(year, month);
        if let Err(err) = &result {
            warn!(year, month, status = err.status(), error = %err, "forecast rejected");
        }
        ForecastResponse::from(result)
    }
}
