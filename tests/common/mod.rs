//! Shared test utilities for Lumen integration tests.
//!
//! Builds Prometheus-shaped response bodies and mounts them on a wiremock
//! server so the real HTTP client can be exercised end to end.

#![allow(dead_code)]

use lumen::api::{create_router, AppState};
use lumen::config::LumenConfig;
use lumen::dashboard::MetricsAggregator;
use lumen::prometheus::PromQuery;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// 2024-01-01T00:00:00Z
pub const DAY_START: f64 = 1_704_067_200.0;

/// Four hours, the default step
pub const STEP: f64 = 14_400.0;

/// Labels of six points starting at midnight, four hours apart
pub const DAY_LABELS: [&str; 6] = ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"];

/// Queries answered by the instant endpoint.
pub const INSTANT_QUERIES: [PromQuery; 4] = [
    PromQuery::ConcurrentRequests,
    PromQuery::Uptime,
    PromQuery::ErrorRate,
    PromQuery::Liveness,
];

// =============================================================================
// Response Bodies
// =============================================================================

/// Successful range response with one series of `values`, starting at midnight.
pub fn range_body(values: &[f64]) -> Value {
    let samples: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| json!([DAY_START + i as f64 * STEP, v.to_string()]))
        .collect();

    json!({
        "status": "success",
        "data": {
            "resultType": "matrix",
            "result": [{"metric": {}, "values": samples}]
        }
    })
}

/// Successful instant response with a single sample.
pub fn instant_body(value: &str) -> Value {
    json!({
        "status": "success",
        "data": {
            "resultType": "vector",
            "result": [{"metric": {}, "value": [DAY_START, value]}]
        }
    })
}

/// Successful response with no result items.
pub fn empty_body(result_type: &str) -> Value {
    json!({
        "status": "success",
        "data": {"resultType": result_type, "result": []}
    })
}

/// Payload-level failure as Prometheus reports it.
pub fn error_body(message: &str) -> Value {
    json!({
        "status": "error",
        "errorType": "bad_data",
        "error": message
    })
}

// =============================================================================
// Mock Mounting
// =============================================================================

pub async fn mount_range(server: &MockServer, query: PromQuery, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/v1/query_range"))
        .and(query_param("query", query.expr()))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_instant(server: &MockServer, query: PromQuery, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .and(query_param("query", query.expr()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Answer every query with `value` for instants and a six-point day of
/// `1..=6` for ranges.
pub async fn mount_healthy_backend(server: &MockServer) {
    for query in PromQuery::ALL {
        if INSTANT_QUERIES.contains(&query) {
            let value = match query {
                PromQuery::ConcurrentRequests => "42",
                PromQuery::Uptime => "0.9998",
                PromQuery::ErrorRate => "0.0002",
                _ => "1",
            };
            mount_instant(
                server,
                query,
                ResponseTemplate::new(200).set_body_json(instant_body(value)),
            )
            .await;
        } else {
            mount_range(
                server,
                query,
                ResponseTemplate::new(200)
                    .set_body_json(range_body(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
            )
            .await;
        }
    }
}

// =============================================================================
// Configuration and App Builders
// =============================================================================

/// Configuration pointing at `base_url`, or with no backend for `None`.
pub fn config_for(base_url: Option<String>) -> LumenConfig {
    let mut config = LumenConfig::default();
    config.prometheus.base_url = base_url;
    config.prometheus.timeout_seconds = 5;
    config
}

pub fn aggregator_for(config: &LumenConfig) -> MetricsAggregator {
    MetricsAggregator::from_config(config).unwrap()
}

/// Build the full router around `config`.
pub fn create_test_app(config: LumenConfig) -> axum::Router {
    let aggregator = Arc::new(aggregator_for(&config));
    let state = Arc::new(AppState::new(aggregator, Arc::new(config)));
    create_router(state)
}

/// Mount a response for `query` that wins over any default mounted later or earlier.
pub async fn mount_override(server: &MockServer, query: PromQuery, response: ResponseTemplate) {
    let endpoint = if INSTANT_QUERIES.contains(&query) {
        "/api/v1/query"
    } else {
        "/api/v1/query_range"
    };
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("query", query.expr()))
        .respond_with(response)
        .with_priority(1)
        .mount(server)
        .await;
}
