use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::{Prediction, QualityModel};
use crate::features::{Features, FEATURE_COUNT};

/// Serialized form of the trained quality model.
///
/// Two kinds are in circulation: a linear regressor that emits the score
/// directly, and a logistic classifier whose positive-class probability is
/// scaled to a score downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegression { weights: Vec<f64>, intercept: f64 },
    LogisticRegression { weights: Vec<f64>, intercept: f64 },
}

impl ModelArtifact {
    /// Reject artifacts whose weight count does not match the feature schema.
    pub fn validate(&self) -> Result<()> {
        let weights = match self {
            Self::LinearRegression { weights, .. } => weights,
            Self::LogisticRegression { weights, .. } => weights,
        };
        if weights.len() != FEATURE_COUNT {
            bail!(
                "model expects {} weights, artifact has {}",
                FEATURE_COUNT,
                weights.len()
            );
        }
        Ok(())
    }

    fn decision_value(weights: &[f64], intercept: f64, features: &Features) -> f64 {
        let dot: f64 = weights
            .iter()
            .zip(features.to_vector())
            .map(|(w, x)| w * x)
            .sum();
        intercept + dot
    }

    fn class_probabilities(weights: &[f64], intercept: f64, features: &Features) -> Vec<f64> {
        let z = Self::decision_value(weights, intercept, features);
        let positive = 1.0 / (1.0 + (-z).exp());
        vec![1.0 - positive, positive]
    }
}

impl QualityModel for ModelArtifact {
    fn name(&self) -> &'static str {
        match self {
            Self::LinearRegression { .. } => "linear_regression",
            Self::LogisticRegression { .. } => "logistic_regression",
        }
    }

    fn predict(&self, features: &Features) -> Result<Prediction> {
        self.validate()?;
        match self {
            Self::LinearRegression { weights, intercept } => Ok(Prediction::Score(
                Self::decision_value(weights, *intercept, features),
            )),
            Self::LogisticRegression { weights, intercept } => Ok(Prediction::Probabilities(
                Self::class_probabilities(weights, *intercept, features),
            )),
        }
    }

    fn predict_probabilities(&self, features: &Features) -> Option<Vec<f64>> {
        match self {
            Self::LinearRegression { .. } => None,
            Self::LogisticRegression { weights, intercept } => {
                Some(Self::class_probabilities(weights, *intercept, features))
            }
        }
    }
}
