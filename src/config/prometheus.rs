//! Metrics backend connection settings

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection to a Prometheus-compatible query API.
///
/// `base_url` is optional on purpose: without it the dashboard still renders,
/// serving mock data with an advisory error on every section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrometheusConfig {
    /// Base URL of the query API, e.g. `http://prometheus:9090`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sent as `Authorization: Bearer <token>` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Per-request timeout for backend queries
    pub timeout_seconds: u64,
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            timeout_seconds: 30,
        }
    }
}

impl fmt::Debug for PrometheusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrometheusConfig")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer_token.is_some())
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl PrometheusConfig {
    /// Base URL with trailing slashes removed, if configured.
    pub fn normalized_base_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::invalid(
                    "prometheus.base_url",
                    "URL cannot be empty",
                ));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    "prometheus.base_url",
                    "URL must start with http:// or https://",
                ));
            }
        }

        if matches!(&self.bearer_token, Some(token) if token.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "prometheus.bearer_token",
                "token cannot be empty",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "prometheus.timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prometheus_config_defaults() {
        let config = PrometheusConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.bearer_token.is_none());
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalized_base_url_trims_trailing_slash() {
        let config = PrometheusConfig {
            base_url: Some("http://prom:9090//".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.normalized_base_url().as_deref(),
            Some("http://prom:9090")
        );
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = PrometheusConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.normalized_base_url().is_none());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "prometheus.base_url"
        ));
    }

    #[test]
    fn test_debug_hides_bearer_token() {
        let config = PrometheusConfig {
            base_url: Some("http://prom:9090".to_string()),
            bearer_token: Some("tok-9f2e".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("tok-9f2e"));
        assert!(debug.contains("authenticated: true"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let config = PrometheusConfig {
            base_url: Some("http://prom:9090".to_string()),
            bearer_token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "prometheus.bearer_token"
        ));
    }
}
