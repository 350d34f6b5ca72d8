//! Editor configuration.
//!
//! Configuration is read from TOML. Every field is optional; anything
//! missing takes its default.
//!
//! ```toml
//! [export]
//! jpeg_quality = 85
//!
//! [preview]
//! max_width = 1600
//! max_height = 900
//! filter = "bilinear"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::ExportOptions;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Display-region settings for rendering previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub filter: FilterType,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: 1280,
            max_height: 800,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub export: ExportOptions,
    pub preview: PreviewConfig,
}

impl EditorConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}
