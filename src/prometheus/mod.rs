//! Prometheus query API client.
//!
//! Two request shapes are used against a Prometheus-compatible backend:
//!
//! - `GET {base}/api/v1/query_range?query=&start=&end=&step=` → time series
//! - `GET {base}/api/v1/query?query=` → single scalar
//!
//! Both optionally carry `Authorization: Bearer <token>`. Only the first
//! result item of a response is read; an empty result is an empty series
//! (range) or zero (instant), not an error.

mod error;
pub mod queries;
pub mod types;

pub use error::QueryError;
pub use queries::PromQuery;
pub use types::SamplePoint;

use crate::config::PrometheusConfig;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::{Duration, Instant};
use types::{InstantSample, QueryData, QueryResponse, RangeSeries};

/// Which of the two query endpoints a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Range,
    Instant,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Range => "range",
            QueryKind::Instant => "instant",
        }
    }

    fn path(self) -> &'static str {
        match self {
            QueryKind::Range => "/api/v1/query_range",
            QueryKind::Instant => "/api/v1/query",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute time window and sampling step for range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step_seconds: u64,
}

impl QueryWindow {
    /// `[end - range_hours, end]`, saturating at the earliest representable
    /// instant.
    pub fn ending_at(end: DateTime<Utc>, range_hours: u32, step_seconds: u64) -> Self {
        let start = end
            .checked_sub_signed(ChronoDuration::hours(i64::from(range_hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Self {
            start,
            end,
            step_seconds,
        }
    }

    fn query_params(&self) -> [(&'static str, String); 3] {
        [
            ("start", self.start.timestamp().to_string()),
            ("end", self.end.timestamp().to_string()),
            ("step", self.step_seconds.to_string()),
        ]
    }
}

/// Source of raw samples for the dashboard.
///
/// The aggregator only talks to this trait, so tests and alternative
/// backends can stand in for the HTTP client.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Chronological samples of `query` over `window`.
    async fn query_range(
        &self,
        query: PromQuery,
        window: &QueryWindow,
    ) -> Result<Vec<SamplePoint>, QueryError>;

    /// Current value of `query`.
    async fn query_instant(&self, query: PromQuery) -> Result<f64, QueryError>;
}

/// HTTP client for a Prometheus-compatible query API.
#[derive(Clone)]
pub struct PrometheusClient {
    base_url: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl fmt::Debug for PrometheusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrometheusClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer_token.is_some())
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl PrometheusClient {
    /// Create a client with its own connection pool.
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        let mut prometheus = Self::with_client(base_url, bearer_token, client);
        prometheus.timeout_seconds = timeout.as_secs();
        Ok(prometheus)
    }

    /// Create a client around an existing reqwest client (for testing).
    pub fn with_client(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
            client,
            timeout_seconds: 0,
        }
    }

    /// Build a client from configuration, or `None` when no base URL is set.
    pub fn from_config(config: &PrometheusConfig) -> Result<Option<Self>, reqwest::Error> {
        match config.normalized_base_url() {
            Some(base_url) => Self::new(
                base_url,
                config.bearer_token.clone(),
                Duration::from_secs(config.timeout_seconds),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one query and unwrap the response envelope.
    async fn fetch<R: DeserializeOwned>(
        &self,
        kind: QueryKind,
        query: PromQuery,
        params: &[(&str, String)],
    ) -> Result<QueryData<R>, QueryError> {
        let url = format!("{}{}", self.base_url, kind.path());
        let started = Instant::now();

        let result = self.send::<R>(kind, &url, query, params).await;

        crate::metrics::record_backend_query(
            kind,
            result.as_ref().err().map_or("success", QueryError::outcome_label),
            started.elapsed(),
        );

        if let Err(e) = &result {
            tracing::debug!(
                query = %query,
                kind = %kind,
                error = %e,
                "Backend query failed"
            );
        }

        result
    }

    async fn send<R: DeserializeOwned>(
        &self,
        kind: QueryKind,
        url: &str,
        query: PromQuery,
        params: &[(&str, String)],
    ) -> Result<QueryData<R>, QueryError> {
        let mut request = self
            .client
            .get(url)
            .query(&[("query", query.expr())])
            .query(params);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| QueryError::from_transport(kind, e, self.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::HttpStatus {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QueryError::from_transport(kind, e, self.timeout_seconds))?;

        let payload: QueryResponse<R> =
            serde_json::from_str(&body).map_err(|e| QueryError::Decode {
                kind,
                message: e.to_string(),
            })?;

        if !payload.is_success() {
            return Err(QueryError::unsuccessful(kind, payload.error));
        }

        payload
            .data
            .ok_or_else(|| QueryError::unsuccessful(kind, payload.error))
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    async fn query_range(
        &self,
        query: PromQuery,
        window: &QueryWindow,
    ) -> Result<Vec<SamplePoint>, QueryError> {
        let data: QueryData<RangeSeries> = self
            .fetch(QueryKind::Range, query, &window.query_params())
            .await?;

        Ok(data
            .result
            .first()
            .map(|series| series.values.iter().map(|raw| raw.to_point()).collect())
            .unwrap_or_default())
    }

    async fn query_instant(&self, query: PromQuery) -> Result<f64, QueryError> {
        let data: QueryData<InstantSample> = self.fetch(QueryKind::Instant, query, &[]).await?;

        Ok(data
            .result
            .first()
            .and_then(|sample| sample.value.as_ref())
            .map(|raw| raw.to_point().value)
            .unwrap_or(0.0))
    }
}
