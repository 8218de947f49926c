//! Widget configuration: screen texts and log location.
//!
//! Loaded from an optional TOML file. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Texts shown by the renderer and the effects boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Header of the Question screen.
    pub question: String,
    /// Header of the Form screen.
    pub form_prompt: String,
    /// Placeholder shown while the draft is empty.
    pub placeholder: String,
    /// Header prefix of the Thanks screen; the response is appended.
    pub thanks_prefix: String,
    /// Text of the blocking notice on an empty submission.
    pub invalid_notice: String,
    /// Directory for the log file. `None` means the platform data dir.
    pub log_dir: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            question: "How was your experience?".to_string(),
            form_prompt: "Care to tell us why?".to_string(),
            placeholder: "Complain here".to_string(),
            thanks_prefix: "Thanks for your feedback:".to_string(),
            invalid_notice: "You did not fill out the form!!".to_string(),
            log_dir: None,
        }
    }
}

impl WidgetConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Full Thanks header for a captured response.
    pub fn thanks_line(&self, response: &str) -> String {
        format!("{} {}", self.thanks_prefix, response)
    }
}
