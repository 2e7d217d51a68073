//! Linear regression over the named feature schema

use crate::features::{Feature, FeatureRow};
use serde::{Deserialize, Serialize};

/// One coefficient per schema column, addressed by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureWeights {
    pub dayofweek: f64,
    pub month: f64,
    pub day: f64,
    pub lag1: f64,
    pub rolling_mean7: f64,
    pub rolling_std7: f64,
}

impl FeatureWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::DayOfWeek => self.dayofweek,
            Feature::Month => self.month,
            Feature::Day => self.day,
            Feature::Lag1 => self.lag1,
            Feature::RollingMean7 => self.rolling_mean7,
            Feature::RollingStd7 => self.rolling_std7,
        }
    }
}

/// `intercept + sum(weight * feature)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: FeatureWeights,
}

impl LinearModel {
    pub fn evaluate(&self, row: &FeatureRow) -> f64 {
        Feature::SCHEMA
            .iter()
            .fold(self.intercept, |acc, &f| acc + self.weights.get(f) * row.get(f))
    }
}
