//! Error types for backend queries.

use super::QueryKind;
use thiserror::Error;

/// Errors that can occur while querying the metrics backend.
///
/// The `Display` text is what ends up in a section's `error` field, so it is
/// written for a human looking at the dashboard.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Backend answered with a non-2xx status
    #[error("Prometheus {kind} query failed ({status})")]
    HttpStatus { kind: QueryKind, status: u16 },

    /// Backend answered 2xx but the payload reported a failure
    #[error("{message}")]
    Backend { kind: QueryKind, message: String },

    /// Connection refused, DNS failure, reset
    #[error("Prometheus {kind} query could not reach the backend: {message}")]
    Network { kind: QueryKind, message: String },

    /// Request exceeded the client timeout
    #[error("Prometheus {kind} query timed out after {seconds}s")]
    Timeout { kind: QueryKind, seconds: u64 },

    /// Body was not the expected JSON envelope
    #[error("Prometheus {kind} query returned an unreadable payload: {message}")]
    Decode { kind: QueryKind, message: String },
}

impl QueryError {
    /// Payload status was not `success`, with the backend's own message if any.
    pub fn unsuccessful(kind: QueryKind, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Prometheus {} query did not succeed", kind));
        Self::Backend { kind, message }
    }

    /// Classify a reqwest error into a QueryError.
    pub fn from_transport(kind: QueryKind, e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                kind,
                seconds: timeout_seconds,
            }
        } else if e.is_decode() {
            Self::Decode {
                kind,
                message: e.to_string(),
            }
        } else {
            Self::Network {
                kind,
                message: e.to_string(),
            }
        }
    }

    /// Short label for metrics.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } => "http_error",
            Self::Backend { .. } => "backend_error",
            Self::Network { .. } => "network_error",
            Self::Timeout { .. } => "timeout",
            Self::Decode { .. } => "decode_error",
        }
    }
}
