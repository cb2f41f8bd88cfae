// Configuration error types

use crate::error::ErrorCode;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading or validating [`crate::config::AppConfig`]
///
/// Error code range: 3001-3003
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected schema
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A field holds a value the calibrator cannot work with
    Invalid { field: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::Read { .. } => 3001,
            ConfigError::Parse { .. } => 3002,
            ConfigError::Invalid { .. } => 3003,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::Read { path, source } => {
                format!("Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                format!("Failed to parse config {}: {}", path.display(), source)
            }
            ConfigError::Invalid { field, reason } => {
                format!("Invalid config field '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}
