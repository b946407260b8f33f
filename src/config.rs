//! Engine tuning knobs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds and bounds used by the objective engine.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// General army that opens the readiness gate.
    pub start_army: u32,
    /// Maximum number of discovered objectives kept in the queue tail.
    pub tail_capacity: usize,
    /// Maximum number of flood rounds when routing.
    pub flood_ceiling: usize,
    /// Collect candidates tried before giving up for the tick.
    pub collect_attempts: usize,
    /// Length of the priority cycle in turns.
    pub priority_window: u32,
    /// Turns at the end of each window during which Collect outranks the tail.
    pub collect_first_span: u32,
    /// General army above which exploration objectives are discovered.
    pub explore_army: u32,
    /// Army at which a tile may push into swamps from dry land.
    pub swamp_army: u32,
    /// Seed for tie-break shuffling.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_army: 5,
            tail_capacity: 64,
            flood_ceiling: 256,
            collect_attempts: 32,
            priority_window: 500,
            collect_first_span: 100,
            explore_army: 50,
            swamp_army: 50,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tail_capacity == 0 {
            return Err(ConfigError::Invalid("tail_capacity must be positive".into()));
        }
        if self.flood_ceiling == 0 {
            return Err(ConfigError::Invalid("flood_ceiling must be positive".into()));
        }
        if self.collect_attempts == 0 {
            return Err(ConfigError::Invalid(
                "collect_attempts must be positive".into(),
            ));
        }
        if self.priority_window == 0 {
            return Err(ConfigError::Invalid(
                "priority_window must be positive".into(),
            ));
        }
        if self.collect_first_span > self.priority_window {
            return Err(ConfigError::Invalid(format!(
                "collect_first_span {} exceeds priority_window {}",
                self.collect_first_span, self.priority_window
            )));
        }
        Ok(())
    }
}
