pub mod engine;
pub mod fallback;

pub use engine::{sample_submission, ScoreResult, ScoreStatus, ScoringEngine};
pub use fallback::fallback_score;

/// Round to the 2 decimal places all reported scores carry.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
