//! Configuration management for calibration parameters
//!
//! This module provides runtime configuration loading from JSON files, so
//! thresholds and the target grid size can be tuned per device without
//! recompilation. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calibration::{DEFAULT_THRESHOLD_DOUBLECLICK, DEFAULT_THRESHOLD_MISCLICK};
use crate::error::ConfigError;

/// Grid divisions of the default calibration target
pub const DEFAULT_NUM_BLOCKS: u32 = 8;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub calibrator: CalibratorConfig,
}

/// Calibrator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibratorConfig {
    /// Pixel distance under which a click repeats the previous one (0 disables)
    pub threshold_doubleclick: i32,
    /// Pixel distance used by the mis-click heuristic
    pub threshold_misclick: i32,
    /// Grid divisions of the calibration target; targets sit one block in
    pub num_blocks: u32,
    /// Emit debug diagnostics for every click
    pub verbose: bool,
}

impl Default for CalibratorConfig {
    fn default() -> Self {
        Self {
            threshold_doubleclick: DEFAULT_THRESHOLD_DOUBLECLICK,
            threshold_misclick: DEFAULT_THRESHOLD_MISCLICK,
            num_blocks: DEFAULT_NUM_BLOCKS,
            verbose: false,
        }
    }
}

impl CalibratorConfig {
    /// Check values the calibrator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_blocks <= 2 {
            return Err(ConfigError::Invalid {
                field: "num_blocks",
                reason: format!("must be greater than 2 (got {})", self.num_blocks),
            });
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the defaults if the file is missing,
    /// unreadable, invalid JSON or fails validation
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log::warn!("[Config] {}. Using defaults.", err);
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting any failure
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.calibrator.validate()?;
        Ok(config)
    }
}
