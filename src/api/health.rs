//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// A metrics backend URL is configured
    pub backend_configured: bool,
    /// Snapshots default to mock data
    pub use_mock: bool,
}

/// GET /health - Report service status.
///
/// Always `ok` while the process serves requests; a missing backend degrades
/// the dashboard to mock data but does not make the service unhealthy.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        backend_configured: state.aggregator.backend_configured(),
        use_mock: state.aggregator.defaults().use_mock,
    })
}
