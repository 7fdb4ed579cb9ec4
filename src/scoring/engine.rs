use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::fallback::fallback_score;
use super::round2;
use crate::features::{extract_features, Features};
use crate::model::{Prediction, QualityModel};

/// Label reported with every enhanced score.
pub const ENHANCEMENT_LABEL: &str = "+25 points";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Success,
    FallbackEnhanced,
    Error,
}

/// Probability output captured from models that expose it.
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfidence {
    pub probabilities: Vec<f64>,
    pub confidence: f64,
}

/// The structured outcome of one scoring call.
///
/// Built fresh per call and handed to the caller to serialize; nothing here
/// is persisted by the scoring core.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub quality_score: f64,
    pub original_score: f64,
    pub enhancement_applied: &'static str,
    pub model_used: bool,
    pub status: ScoreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_values: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<ModelConfidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoreResult {
    /// Last-resort result when the pipeline itself fails: a neutral score
    /// and the error detail, so callers always receive a well-formed value.
    fn emergency(error: String) -> Self {
        Self {
            quality_score: 50.0,
            original_score: 50.0,
            enhancement_applied: ENHANCEMENT_LABEL,
            model_used: false,
            status: ScoreStatus::Error,
            model_type: None,
            feature_values: None,
            predictions: None,
            note: None,
            error: Some(error),
        }
    }
}

/// Scores submissions against the model handle it was constructed with.
///
/// The handle is loaded once at startup and never replaced; a process that
/// starts without a model stays on the rule-based path for its lifetime.
/// Scoring holds no other state, so calls are independent.
pub struct ScoringEngine {
    model: Option<Box<dyn QualityModel>>,
}

impl ScoringEngine {
    pub fn new(model: Option<Box<dyn QualityModel>>) -> Self {
        Self { model }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Score one submission. Always returns a result: the model path when a
    /// usable prediction comes back, the rule-based path otherwise, and the
    /// emergency default if the pipeline fails outright.
    pub fn score(&self, submission: &Value) -> ScoreResult {
        match self.try_score(submission) {
            Ok(result) => result,
            Err(e) => ScoreResult::emergency(e.to_string()),
        }
    }

    fn try_score(&self, submission: &Value) -> Result<ScoreResult> {
        if !submission.is_object() {
            bail!("submission must be a JSON object");
        }
        let features = extract_features(submission);

        if let Some(model) = self.model.as_deref() {
            match model.predict(&features).and_then(|p| raw_score_from(&p)) {
                Ok(raw) => return Ok(assemble_model_result(model, &features, raw)),
                Err(e) => {
                    // A failed invocation degrades this call only; the
                    // handle stays loaded for the next one.
                    eprintln!("Model prediction failed ({}); using rule-based fallback", e);
                }
            }
        }

        Ok(assemble_fallback_result(&features))
    }
}

/// Interpret the model output: a scalar is the raw score, a probability
/// vector contributes its positive-class probability scaled to 0-100.
fn raw_score_from(prediction: &Prediction) -> Result<f64> {
    match prediction {
        Prediction::Score(score) => Ok(*score),
        Prediction::Probabilities(probs) => match probs.get(1) {
            Some(positive) => Ok(positive * 100.0),
            None => bail!("probability output has fewer than two classes"),
        },
    }
}

fn assemble_model_result(model: &dyn QualityModel, features: &Features, raw: f64) -> ScoreResult {
    let enhanced = round2((raw + raw * 0.25).clamp(0.0, 100.0));

    // Confidence capture is best-effort and never affects the score
    let predictions = model.predict_probabilities(features).and_then(|probs| {
        let confidence = probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if probs.is_empty() {
            None
        } else {
            Some(ModelConfidence {
                probabilities: probs,
                confidence,
            })
        }
    });

    ScoreResult {
        quality_score: enhanced,
        original_score: round2(raw),
        enhancement_applied: ENHANCEMENT_LABEL,
        model_used: true,
        status: ScoreStatus::Success,
        model_type: Some(model.name().to_string()),
        feature_values: Some(features.to_json_map()),
        predictions,
        note: None,
        error: None,
    }
}

fn assemble_fallback_result(features: &Features) -> ScoreResult {
    let raw = fallback_score(features);
    let enhanced = round2((raw + 25.0).clamp(0.0, 100.0));

    ScoreResult {
        quality_score: enhanced,
        original_score: raw,
        enhancement_applied: ENHANCEMENT_LABEL,
        model_used: false,
        status: ScoreStatus::FallbackEnhanced,
        model_type: None,
        feature_values: Some(features.to_json_map()),
        predictions: None,
        note: Some("rule-based fallback scoring with +25 point enhancement".to_string()),
        error: None,
    }
}

/// Canonical sample submission used by the selftest command.
pub fn sample_submission() -> Value {
    json!({
        "project_name": "Test Mangrove Restoration Project",
        "ecosystem_type": "mangrove",
        "area_hectares": 5.5,
        "description": "This is a test project for mangrove restoration in coastal areas with community involvement.",
        "location": {"lat": 19.0760, "lng": 72.8777},
        "field_measurements": {
            "water_quality": {
                "ph_level": 7.2,
                "salinity": 30.0,
                "dissolved_oxygen": 6.5
            },
            "soil_analysis": {
                "carbon_content": 3.5,
                "ph_level": 7.0,
                "salinity": 15.0
            }
        },
        "ipfs_hashes": [
            {"type": "photos", "filename": "test1.jpg"},
            {"type": "photos", "filename": "test2.jpg"},
            {"type": "videos", "filename": "test.mp4"},
            {"type": "documents", "filename": "report.pdf"}
        ]
    })
}
