//! Configuration module for Lumen
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`METRICS_USE_MOCK`, `PROMETHEUS_*`, `LUMEN_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! The resolved configuration is built once at startup and handed to the
//! aggregator and the API explicitly. Nothing below reads the environment
//! after that point.
//!
//! # Example
//!
//! ```rust
//! use lumen::config::LumenConfig;
//!
//! let config = LumenConfig::default();
//! assert_eq!(config.server.port, 3001);
//! assert!(config.prometheus.base_url.is_none());
//!
//! let toml = r#"
//! [prometheus]
//! base_url = "http://prometheus:9090"
//! "#;
//! let config: LumenConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.prometheus.base_url.as_deref(), Some("http://prometheus:9090"));
//! ```

pub mod dashboard;
pub mod error;
pub mod logging;
pub mod prometheus;
pub mod server;

pub use dashboard::DashboardConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use prometheus::PrometheusConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Lumen service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LumenConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Metrics backend connection
    pub prometheus: PrometheusConfig,
    /// Snapshot defaults (mock flag, window, step)
    pub dashboard: DashboardConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl LumenConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// The metrics backend variables keep the names the dashboard has always
    /// been deployed with. Empty values and unparseable numbers are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        // Metrics backend
        if let Ok(flag) = std::env::var("METRICS_USE_MOCK") {
            self.dashboard.use_mock = dashboard::parse_mock_flag(&flag);
        }
        if let Some(url) = non_empty_var("PROMETHEUS_BASE_URL") {
            self.prometheus.base_url = Some(url);
        }
        if let Some(token) = non_empty_var("PROMETHEUS_BEARER_TOKEN") {
            self.prometheus.bearer_token = Some(token);
        }

        // Server settings
        if let Ok(port) = std::env::var("LUMEN_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(host) = non_empty_var("LUMEN_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Some(level) = non_empty_var("LUMEN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LUMEN_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.prometheus.validate()?;
        self.dashboard.validate()?;
        self.logging.validate()?;

        // A backend that stalls must fail its section before the server
        // times out the whole request.
        if self.prometheus.timeout_seconds >= self.server.request_timeout_seconds {
            return Err(ConfigError::invalid(
                "prometheus.timeout_seconds",
                "must be shorter than server.request_timeout_seconds",
            ));
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
