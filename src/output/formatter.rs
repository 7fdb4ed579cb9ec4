use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::features::{Features, FEATURE_NAMES};
use crate::scoring::{ScoreResult, ScoreStatus};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score result as pretty JSON for stdout consumers
pub fn format_result(result: &ScoreResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

/// Format a one-line human summary of a scoring outcome
/// e.g. "Quality score: 87.50 (model: logistic_regression)"
pub fn format_score_summary(result: &ScoreResult, use_colors: bool) -> String {
    let source = match result.status {
        ScoreStatus::Success => match result.model_type.as_deref() {
            Some(name) => format!("model: {}", name),
            None => "model".to_string(),
        },
        ScoreStatus::FallbackEnhanced => "rule-based fallback".to_string(),
        ScoreStatus::Error => "emergency default".to_string(),
    };

    let score_text = format!("{:.2}", result.quality_score);
    if use_colors {
        let colored_score = if result.quality_score >= 75.0 {
            score_text.green().bold().to_string()
        } else if result.quality_score >= 50.0 {
            score_text.yellow().bold().to_string()
        } else {
            score_text.red().bold().to_string()
        };
        format!("Quality score: {} ({})", colored_score, source.dimmed())
    } else {
        format!("Quality score: {} ({})", score_text, source)
    }
}

/// Format the 15 extracted features as an aligned two-column table
pub fn format_feature_table(features: &Features) -> String {
    FEATURE_NAMES
        .iter()
        .zip(features.to_vector())
        .map(|(name, value)| format!("{:<28} {:>12.4}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}
