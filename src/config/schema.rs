use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the trained model artifact
    #[serde(default)]
    pub model_path: Option<String>,

    /// Path to the user store JSON file
    #[serde(default)]
    pub user_store_path: Option<String>,
}

impl Config {
    /// Resolved model artifact path (default: models/quality_model.json)
    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models/quality_model.json"))
    }

    /// Resolved user store path (default: ~/.config/bluescore/users.json)
    pub fn user_store_path(&self) -> PathBuf {
        self.user_store_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::users::get_user_store_path)
    }
}
