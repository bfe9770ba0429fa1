//! Error types
//!
//! Only configuration loading can fail. The simulation recovers from bad
//! numeric state by clamping and never returns errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown preset '{0}' (expected standard, classic, sticky or bonus)")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
