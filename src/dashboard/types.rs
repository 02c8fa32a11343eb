//! Type definitions for dashboard snapshots
//!
//! JSON field names are camelCase: this is the shape the dashboard front end
//! renders.

use serde::{Deserialize, Serialize};

/// One dashboard section's data plus, when the live fetch failed, why.
///
/// `error` present means `data` is a fallback (mock) value, never `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricState<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> MetricState<T> {
    /// Authoritative live data.
    pub fn live(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Fallback data shown alongside a diagnostic.
    pub fn fallback(data: T, error: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSummary {
    pub requests_per_sec: f64,
    pub concurrent: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub time: String,
    pub requests: f64,
    pub concurrent: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    pub summary: TrafficSummary,
    pub series: Vec<TrafficPoint>,
}

/// p50/p90/p99 rollup, shared by request latency and token timings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileSummary {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantilePoint {
    pub time: String,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

/// Request latency, milliseconds-scale values rounded to whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyMetrics {
    pub summary: QuantileSummary,
    pub series: Vec<QuantilePoint>,
}

/// Time to first or last token, in seconds with two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToTokenMetrics {
    pub summary: QuantileSummary,
    pub series: Vec<QuantilePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsageSummary {
    pub input_tokens: f64,
    pub output_tokens: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsagePoint {
    pub time: String,
    pub input: f64,
    pub output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsageMetrics {
    pub summary: ModelUsageSummary,
    pub series: Vec<ModelUsagePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitingSummary {
    pub requests_per_ip_avg: f64,
    pub rejected: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitingPoint {
    pub time: String,
    pub allowed: f64,
    pub rejected: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitingMetrics {
    pub summary: RateLimitingSummary,
    pub series: Vec<RateLimitingPoint>,
}

/// Traffic-light status of a service health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealthMetric {
    pub label: String,
    pub value: String,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealthMetrics {
    pub metrics: Vec<ServiceHealthMetric>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenLengthSummary {
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLengthPoint {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLengthMetrics {
    pub summary: TokenLengthSummary,
    pub series: Vec<TokenLengthPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRequestsSummary {
    pub total_rejected: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRequestsPoint {
    pub time: String,
    pub rejected: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRequestsMetrics {
    pub summary: RejectedRequestsSummary,
    pub series: Vec<RejectedRequestsPoint>,
}

/// A full dashboard snapshot. Every section is independent of the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub traffic: MetricState<TrafficMetrics>,
    pub latency: MetricState<LatencyMetrics>,
    pub model_usage: MetricState<ModelUsageMetrics>,
    pub rate_limiting: MetricState<RateLimitingMetrics>,
    pub service_health: MetricState<ServiceHealthMetrics>,
    pub time_to_first_token: MetricState<TimeToTokenMetrics>,
    pub time_to_last_token: MetricState<TimeToTokenMetrics>,
    pub question_length: MetricState<TokenLengthMetrics>,
    pub answer_length: MetricState<TokenLengthMetrics>,
    pub rejected_requests: MetricState<RejectedRequestsMetrics>,
}

impl DashboardMetrics {
    /// `(section name, error)` for every section, in display order.
    pub fn section_errors(&self) -> [(&'static str, Option<&str>); 10] {
        [
            ("traffic", self.traffic.error.as_deref()),
            ("latency", self.latency.error.as_deref()),
            ("modelUsage", self.model_usage.error.as_deref()),
            ("rateLimiting", self.rate_limiting.error.as_deref()),
            ("serviceHealth", self.service_health.error.as_deref()),
            ("timeToFirstToken", self.time_to_first_token.error.as_deref()),
            ("timeToLastToken", self.time_to_last_token.error.as_deref()),
            ("questionLength", self.question_length.error.as_deref()),
            ("answerLength", self.answer_length.error.as_deref()),
            ("rejectedRequests", self.rejected_requests.error.as_deref()),
        ]
    }

    /// Number of sections showing fallback data.
    pub fn failed_sections(&self) -> usize {
        self.section_errors()
            .iter()
            .filter(|(_, error)| error.is_some())
            .count()
    }
}
