//! Runtime configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "FORMCRAFT_DATA_DIR";

/// Page size used by the remote list when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid config file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormcraftConfig {
    /// Directory holding the `customForms` and `formSubmissions` records.
    pub data_dir: PathBuf,
    /// Base URL of the paged remote list, e.g. `https://swapi.dev/api`.
    pub remote_base_url: Option<String>,
    pub page_size: usize,
}

impl Default for FormcraftConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            remote_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FormcraftConfig {
    /// Defaults, with the data directory taken from the environment if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Read a JSON config file. Missing keys fall back to `from_env()` values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents, Self::from_env()).map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(contents: &str, base: Self) -> Result<Self, String> {
        let overrides: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| e.to_string())?;
        let mut merged = serde_json::to_value(base).map_err(|e| e.to_string())?;
        if let (Some(target), Some(source)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        } else {
            return Err("expected a JSON object".to_string());
        }
        serde_json::from_value(merged).map_err(|e| e.to_string())
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

/// `~/Library/Application Support/Formcraft` on macOS, `~/.formcraft` elsewhere.
pub fn default_data_dir() -> PathBuf {
    let home = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()));
    if cfg!(target_os = "macos") {
        home.join("Library/Application Support/Formcraft")
    } else {
        home.join(".formcraft")
    }
}
