//! Dashboard snapshot endpoint handler.

use crate::api::AppState;
use crate::dashboard::{DashboardMetrics, DashboardOptions};
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// GET /v1/dashboard - Build a fresh snapshot.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Query(options): Query<DashboardOptions>,
) -> Json<DashboardMetrics> {
    Json(state.aggregator.get_dashboard_metrics(options).await)
}
