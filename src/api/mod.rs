//! # Dashboard API
//!
//! JSON endpoints serving dashboard snapshots to the front end.
//!
//! ## Endpoints
//!
//! - `GET /v1/dashboard` - Full dashboard snapshot (`?mock=&range_hours=&step_seconds=`)
//! - `GET /health` - Service status and backend configuration
//! - `GET /metrics` - Self-instrumentation in Prometheus text format
//!
//! ## Example
//!
//! ```no_run
//! use lumen::api::{create_router, AppState};
//! use lumen::config::LumenConfig;
//! use lumen::dashboard::MetricsAggregator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(LumenConfig::default());
//! let aggregator = Arc::new(MetricsAggregator::from_config(&config)?);
//!
//! let state = Arc::new(AppState::new(aggregator, config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! `/v1/dashboard` always answers 200: backend failures show up as per-section
//! `error` fields next to fallback data, never as an HTTP error.

mod dashboard;
mod health;

pub use health::HealthResponse;

use crate::config::LumenConfig;
use crate::dashboard::MetricsAggregator;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<LumenConfig>,
    pub aggregator: Arc<MetricsAggregator>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Renders the process's own metrics
    pub prometheus_handle: PrometheusHandle,
}

impl AppState {
    /// Create application state around an aggregator and the resolved configuration.
    pub fn new(aggregator: Arc<MetricsAggregator>, config: Arc<LumenConfig>) -> Self {
        // Safe to call repeatedly: later calls get a detached handle
        let prometheus_handle = crate::metrics::setup_metrics_or_detached();

        Self {
            config,
            aggregator,
            start_time: Instant::now(),
            prometheus_handle,
        }
    }
}

/// Create the API router with all endpoints and layers configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/v1/dashboard", get(dashboard::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
