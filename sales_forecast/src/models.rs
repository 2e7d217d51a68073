//! Pre-trained regression artifacts
//!
//! An artifact is a versioned JSON document declaring the feature schema it
//! was trained on and the model itself:
//!
//! ```json
//! {
//!   "version": "2023.1",
//!   "features": ["dayofweek", "month", "day", "lag1", "rolling_mean7", "rolling_std7"],
//!   "model": { "kind": "linear", "intercept": 12.5, "weights": { "lag1": 0.4, "...": 0.0 } }
//! }
//! ```
//!
//! Artifacts are loaded once at startup and never mutated afterwards.

use crate::error::{ForecastError, Result};
use crate::features::{Feature, FeatureRow};
use crate::predictor::Predictor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub mod linear;
pub mod tree_ensemble;

pub use linear::{FeatureWeights, LinearModel};
pub use tree_ensemble::{TreeEnsemble, TreeNode};

/// The model body of an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl RegressionModel {
    fn evaluate(&self, row: &FeatureRow) -> f64 {
        match self {
            RegressionModel::Linear(model) => model.evaluate(row),
            RegressionModel::TreeEnsemble(model) => model.evaluate(row),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => "linear",
            RegressionModel::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

/// Serialized form of a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact version string
    pub version: String,
    /// Feature names in training order
    pub features: Vec<String>,
    /// Model parameters
    pub model: RegressionModel,
}

impl ModelArtifact {
    /// Wrap a model with the current schema
    pub fn new(version: impl Into<String>, model: RegressionModel) -> Self {
        Self {
            version: version.into(),
            features: Feature::SCHEMA.iter().map(|f| f.name().to_string()).collect(),
            model,
        }
    }

    /// Check the declared schema matches the feature order exactly
    pub fn validate(&self) -> Result<()> {
        let expected: Vec<&str> = Feature::SCHEMA.iter().map(|f| f.name()).collect();
        if self.features != expected {
            return Err(ForecastError::ModelUnavailable(format!(
                "artifact {} declares features {:?}, expected {:?}",
                self.version, self.features, expected
            )));
        }

        if let RegressionModel::TreeEnsemble(ensemble) = &self.model {
            ensemble.validate().map_err(ForecastError::ModelUnavailable)?;
        }

        Ok(())
    }
}

/// A [`Predictor`] backed by a loaded artifact
#[derive(Debug, Clone)]
pub struct ModelPredictor {
    name: String,
    version: String,
    model: RegressionModel,
}

impl ModelPredictor {
    /// Load and validate an artifact from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ForecastError::ModelUnavailable(format!(
                "cannot read artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let predictor = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            version = %predictor.version,
            kind = predictor.model.kind(),
            "loaded forecast model"
        );
        Ok(predictor)
    }

    /// Parse and validate an artifact document
    pub fn from_json(contents: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(contents).map_err(|e| {
            ForecastError::ModelUnavailable(format!("malformed artifact: {}", e))
        })?;
        Self::from_artifact(artifact)
    }

    /// Use an in-memory artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self {
            name: format!("{} model v{}", artifact.model.kind(), artifact.version),
            version: artifact.version,
            model: artifact.model,
        })
    }

    /// Version of the loaded artifact
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Predictor for ModelPredictor {
    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        Ok(self.model.evaluate(row))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
