//! CLI command implementations for Vanguard.

pub(crate) mod arena;
pub(crate) mod play;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;
use vanguard::EngineConfig;

/// Output format for the `arena` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ArenaFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<vanguard::ConfigError> for CliError {
    fn from(e: vanguard::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<vanguard::arena::ArenaError> for CliError {
    fn from(e: vanguard::arena::ArenaError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the engine config, falling back to defaults without a file.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}
