//! Configuration file
//!
//! Every field is optional. Unknown fields are rejected so typos surface
//! instead of silently falling back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging::{LogFormat, LogSettings};
use crate::stream::{MatchScope, StreamOptions};

use super::errors::{CliError, CliResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which field names may satisfy a requirement (default "anywhere")
    #[serde(default)]
    pub match_scope: MatchScope,

    /// Stop reading once every required name was seen (default true)
    #[serde(default = "default_stop_when_satisfied")]
    pub stop_when_satisfied: bool,

    /// Log level, one of trace, debug, info, warn, error (default "info").
    /// Per-target filters go in `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (default "text")
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_stop_when_satisfied() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_scope: MatchScope::default(),
            stop_when_satisfied: default_stop_when_satisfied(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected one of: {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions {
            match_scope: self.match_scope,
            stop_when_satisfied: self.stop_when_satisfied,
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}
