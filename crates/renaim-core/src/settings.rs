//! Optional settings file.
//!
//! Looked up as `$XDG_CONFIG_HOME/renaim/config.json` (usually
//! `~/.config/renaim/config.json`) unless an explicit path is given. Every
//! key is optional; command-line flags and environment variables take
//! precedence over anything found here.
//!
//! ```json
//! {
//!   "api_key": "sk-...",
//!   "model": "gpt-4o-mini",
//!   "endpoint": "https://api.openai.com/v1/chat/completions",
//!   "timestamp_format": "%Y-%m-%d"
//! }
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{RenameError, Result};

const SETTINGS_FILE: &str = "config.json";

/// Values read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timestamp_format: Option<String>,
    pub output_directory: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `explicit` if given, else from the default
    /// location if a file exists there.
    ///
    /// # Errors
    ///
    /// Returns `RenameError::Settings` when an explicit file is missing or
    /// any file found cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// The settings file under the XDG config directory, if present.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("renaim").find_config_file(SETTINGS_FILE)
    }

    /// Parses a settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RenameError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = serde_json::from_str(&contents).map_err(|e| RenameError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }
}
