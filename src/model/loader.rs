use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use super::ModelArtifact;

// Ordered compatibility modes. Artifacts exported by older pipeline
// versions may carry a non-UTF-8 text encoding or the pre-rename field
// names, so each mode is more permissive than the last.
const STRATEGIES: [(&str, fn(&[u8]) -> Result<ModelArtifact>); 3] = [
    ("standard", load_standard),
    ("lossy-text", load_lossy_text),
    ("legacy-schema", load_legacy_schema),
];

/// Try to load the trained model artifact, one compatibility mode at a time.
///
/// The first mode that yields a valid artifact wins. Total failure is not an
/// error: the caller keeps an absent handle and every score falls back to
/// the rule-based path for the rest of the process.
pub fn load_model(path: &Path, verbose: bool) -> Option<ModelArtifact> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Model artifact unavailable at {}: {}", path.display(), e);
            eprintln!("Scoring will use the rule-based fallback");
            return None;
        }
    };

    for (mode, strategy) in STRATEGIES {
        match strategy(&bytes).and_then(|artifact| {
            artifact.validate()?;
            Ok(artifact)
        }) {
            Ok(artifact) => {
                if verbose {
                    eprintln!("Model loaded ({} mode) from {}", mode, path.display());
                }
                return Some(artifact);
            }
            Err(e) => eprintln!("Model load failed ({} mode): {}", mode, e),
        }
    }

    eprintln!("All model load attempts failed; scoring will use the rule-based fallback");
    None
}

fn load_standard(bytes: &[u8]) -> Result<ModelArtifact> {
    Ok(serde_json::from_slice(bytes)?)
}

fn load_lossy_text(bytes: &[u8]) -> Result<ModelArtifact> {
    let text = String::from_utf8_lossy(bytes);
    Ok(serde_json::from_str(&text)?)
}

fn load_legacy_schema(bytes: &[u8]) -> Result<ModelArtifact> {
    let text = String::from_utf8_lossy(bytes);
    let mut value: Value = serde_json::from_str(&text)?;
    remap_legacy_fields(&mut value);
    Ok(serde_json::from_value(value)?)
}

// Pre-0.3 exporters wrote "kind"/"coef"/"bias" and short kind names.
fn remap_legacy_fields(value: &mut Value) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    for (old, new) in [
        ("kind", "model_type"),
        ("coef", "weights"),
        ("bias", "intercept"),
    ] {
        if let Some(moved) = object.remove(old) {
            object.entry(new).or_insert(moved);
        }
    }
    if let Some(tag) = object.get_mut("model_type") {
        let renamed = match tag.as_str() {
            Some("linear") => Some("linear_regression"),
            Some("logistic") => Some("logistic_regression"),
            _ => None,
        };
        if let Some(name) = renamed {
            *tag = Value::from(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    use crate::model::QualityModel;

    fn write_temp(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn weights_json() -> String {
        let weights = vec![0.0_f64; crate::features::FEATURE_COUNT];
        serde_json::to_string(&weights).unwrap()
    }

    #[test]
    fn test_load_standard_artifact() {
        let json = format!(
            r#"{{"model_type": "linear_regression", "weights": {}, "intercept": 60.0}}"#,
            weights_json()
        );
        let path = write_temp("bluescore_test_model_standard.json", json.as_bytes());
        let model = load_model(&path, false).unwrap();
        assert_eq!(model.name(), "linear_regression");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_artifact_with_stray_bytes() {
        // Valid JSON once the undecodable byte is replaced
        let json = format!(
            r#"{{"model_type": "linear_regression", "weights": {}, "intercept": 60.0}}"#,
            weights_json()
        );
        let mut bytes = json.into_bytes();
        bytes.push(b'\n');
        bytes.push(0xA0);
        let trailing_garbage = load_standard(&bytes).is_err() && load_lossy_text(&bytes).is_err();
        // A trailing undecodable byte still breaks JSON parsing either way;
        // the lossy mode exists for bad bytes inside string fields.
        assert!(trailing_garbage);
    }

    #[test]
    fn test_lossy_mode_recovers_bad_string_encoding() {
        let mut bytes = br#"{"model_type": "linear_regression", "weights": ["#.to_vec();
        bytes.extend_from_slice(weights_json().trim_start_matches('[').as_bytes());
        bytes.extend_from_slice(br#", "intercept": 60.0, "trained_by": ""#);
        bytes.push(0xE9); // latin-1 e-acute, invalid UTF-8
        bytes.extend_from_slice(br#""}"#);
        assert!(load_standard(&bytes).is_err());
        let model = load_lossy_text(&bytes).unwrap();
        assert_eq!(model.name(), "linear_regression");
    }

    #[test]
    fn test_legacy_schema_remap() {
        let json = format!(
            r#"{{"kind": "logistic", "coef": {}, "bias": -0.8}}"#,
            weights_json()
        );
        assert!(load_standard(json.as_bytes()).is_err());
        let model = load_legacy_schema(json.as_bytes()).unwrap();
        assert_eq!(model.name(), "logistic_regression");
    }

    #[test]
    fn test_legacy_mode_reached_through_staged_load() {
        let json = format!(
            r#"{{"kind": "linear", "coef": {}, "bias": 45.0}}"#,
            weights_json()
        );
        let path = write_temp("bluescore_test_model_legacy.json", json.as_bytes());
        let model = load_model(&path, false).unwrap();
        assert_eq!(model.name(), "linear_regression");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = env::temp_dir().join("bluescore_test_model_missing.json");
        let _ = fs::remove_file(&path);
        assert!(load_model(&path, false).is_none());
    }

    #[test]
    fn test_unparseable_artifact_is_none() {
        let path = write_temp("bluescore_test_model_garbage.json", b"not a model");
        assert!(load_model(&path, false).is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_wrong_weight_count_is_none() {
        let json = r#"{"model_type": "linear_regression", "weights": [1.0], "intercept": 0.0}"#;
        let path = write_temp("bluescore_test_model_short.json", json.as_bytes());
        assert!(load_model(&path, false).is_none());
        let _ = fs::remove_file(&path);
    }
}
