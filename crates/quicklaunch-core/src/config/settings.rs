use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

const KNOWN_FIELDS: &[&str] = &["commandsFile", "applicationDirs", "includeHidden"];

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Load candidates from this commands file instead of discovering apps
    #[serde(default)]
    pub commands_file: Option<PathBuf>,

    /// Extra directories scanned during application discovery
    #[serde(default)]
    pub application_dirs: Vec<PathBuf>,

    /// Include entries marked `NoDisplay`/`Hidden`
    #[serde(default)]
    pub include_hidden: bool,
}

impl Config {
    /// Load config from file, or return the default if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Warn about top-level keys the config does not understand.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    for key in unknown_fields(content) {
        warn!("Unknown config field in {config_name}: {key}");
    }
}

fn unknown_fields(content: &str) -> Vec<String> {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(content) else {
        return Vec::new();
    };

    obj.keys()
        .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect()
}
