//! Wire types for the Prometheus HTTP query API.

use serde::Deserialize;

/// One `(timestamp, value)` pair from a range or instant query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Unix time in seconds (Prometheus reports fractional seconds)
    pub timestamp: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Response envelope shared by `/api/v1/query` and `/api/v1/query_range`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse<R> {
    pub status: String,
    #[serde(default = "Option::default")]
    pub data: Option<QueryData<R>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl<R> QueryResponse<R> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData<R> {
    #[serde(default)]
    pub result_type: String,
    #[serde(default = "Vec::new")]
    pub result: Vec<R>,
}

/// Matrix item returned by a range query.
#[derive(Debug, Deserialize)]
pub struct RangeSeries {
    #[serde(default)]
    pub values: Vec<RawSample>,
}

/// Vector item returned by an instant query.
#[derive(Debug, Deserialize)]
pub struct InstantSample {
    pub value: Option<RawSample>,
}

/// Prometheus encodes samples as `[<unix seconds>, "<value>"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample(pub f64, pub String);

impl RawSample {
    /// Parse the sample value, mapping anything that is not a finite number
    /// (garbage, `NaN`, `+Inf`) to zero.
    pub fn to_point(&self) -> SamplePoint {
        SamplePoint::new(self.0, parse_sample_value(&self.1))
    }
}

pub(crate) fn parse_sample_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::debug!(raw = raw, "Non-numeric sample value, using 0");
            0.0
        }
    }
}
