//! Log output settings

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every target
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels keyed by Lumen module name, e.g.
    /// `{"dashboard": "debug", "prometheus": "trace"}` becomes
    /// `lumen::dashboard=debug,lumen::prometheus=trace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject levels `tracing` would not understand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if tracing::Level::from_str(self.level.trim()).is_err() {
            return Err(ConfigError::invalid(
                "logging.level",
                "expected one of trace, debug, info, warn, error",
            ));
        }

        for (component, level) in self.component_levels.iter().flatten() {
            if component.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "logging.component_levels",
                    "module name cannot be empty",
                ));
            }
            if tracing::Level::from_str(level.trim()).is_err() {
                return Err(ConfigError::invalid(
                    "logging.component_levels",
                    "expected one of trace, debug, info, warn, error",
                ));
            }
        }

        Ok(())
    }
}
