//! HTTP listener settings for `lumen serve`

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Where the dashboard API listens and how long one request may take.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single API request, including the snapshot fan-out.
    /// Must exceed `prometheus.timeout_seconds` so section failures are
    /// reported in the snapshot rather than cut off by the server.
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            request_timeout_seconds: 60,
        }
    }
}

impl ServerConfig {
    /// `host:port` as given to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "host cannot be empty"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        Ok(())
    }
}
