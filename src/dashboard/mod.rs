//! Dashboard snapshot assembly
//!
//! [`MetricsAggregator::get_dashboard_metrics`] builds one [`DashboardMetrics`]
//! per call:
//!
//! 1. Mock mode on → the static mock snapshot, no errors.
//! 2. No backend configured → the mock snapshot with an advisory on every
//!    section.
//! 3. Otherwise every section pipeline runs concurrently against the backend.
//!    A failed section is replaced by its mock data plus the error message;
//!    the other sections are unaffected.
//!
//! The call itself never fails.

pub mod mock;
pub mod sections;
pub mod transform;
pub mod types;

pub use types::{DashboardMetrics, MetricState};

use crate::config::dashboard::MAX_RANGE_HOURS;
use crate::config::{DashboardConfig, LumenConfig};
use crate::metrics::{record_section_fallback, record_snapshot, SnapshotSource};
use crate::prometheus::{MetricsBackend, PrometheusClient, QueryError, QueryWindow};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Advisory attached to every section when no backend URL is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Prometheus URL not configured. Serving mock data.";

/// Per-request overrides. Unset or zero fields fall back to
/// [`DashboardConfig`]; `range_hours` is capped at [`MAX_RANGE_HOURS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardOptions {
    #[serde(default, rename = "mock")]
    pub use_mock: Option<bool>,
    #[serde(default)]
    pub range_hours: Option<u32>,
    #[serde(default)]
    pub step_seconds: Option<u64>,
}

impl DashboardOptions {
    pub fn mock() -> Self {
        Self {
            use_mock: Some(true),
            ..Self::default()
        }
    }
}

/// Builds dashboard snapshots from an optional metrics backend.
#[derive(Clone)]
pub struct MetricsAggregator {
    backend: Option<Arc<dyn MetricsBackend>>,
    defaults: DashboardConfig,
}

impl std::fmt::Debug for MetricsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsAggregator")
            .field("backend_configured", &self.backend.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl MetricsAggregator {
    /// Wire up the Prometheus client described by `config`, if any.
    pub fn from_config(config: &LumenConfig) -> Result<Self, reqwest::Error> {
        let backend = PrometheusClient::from_config(&config.prometheus)?
            .map(|client| Arc::new(client) as Arc<dyn MetricsBackend>);

        Ok(Self {
            backend,
            defaults: config.dashboard.clone(),
        })
    }

    pub fn with_backend(backend: Arc<dyn MetricsBackend>, defaults: DashboardConfig) -> Self {
        Self {
            backend: Some(backend),
            defaults,
        }
    }

    pub fn without_backend(defaults: DashboardConfig) -> Self {
        Self {
            backend: None,
            defaults,
        }
    }

    pub fn backend_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn defaults(&self) -> &DashboardConfig {
        &self.defaults
    }

    /// Build a snapshot for the window ending now.
    pub async fn get_dashboard_metrics(&self, options: DashboardOptions) -> DashboardMetrics {
        self.get_dashboard_metrics_ending_at(options, Utc::now())
            .await
    }

    /// Build a snapshot for the window ending at `end`.
    pub async fn get_dashboard_metrics_ending_at(
        &self,
        options: DashboardOptions,
        end: DateTime<Utc>,
    ) -> DashboardMetrics {
        if options.use_mock.unwrap_or(self.defaults.use_mock) {
            tracing::info!("Mock mode enabled, serving mock dashboard data");
            record_snapshot(SnapshotSource::Mock);
            return mock::mock_dashboard_metrics();
        }

        let Some(backend) = &self.backend else {
            tracing::warn!("{}", NOT_CONFIGURED_MESSAGE);
            record_snapshot(SnapshotSource::Unconfigured);
            return mock::mock_dashboard_metrics_with_error(NOT_CONFIGURED_MESSAGE);
        };

        let window = QueryWindow::ending_at(
            end,
            options
                .range_hours
                .filter(|h| *h > 0)
                .unwrap_or(self.defaults.range_hours)
                .min(MAX_RANGE_HOURS),
            options
                .step_seconds
                .filter(|s| *s > 0)
                .unwrap_or(self.defaults.step_seconds),
        );

        let started = Instant::now();
        let snapshot = collect(backend.as_ref(), &window).await;

        tracing::debug!(
            failed_sections = snapshot.failed_sections(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dashboard snapshot complete"
        );
        record_snapshot(SnapshotSource::Live);

        snapshot
    }
}

/// Run every section pipeline and wait for all of them, failed or not.
async fn collect(backend: &dyn MetricsBackend, window: &QueryWindow) -> DashboardMetrics {
    let (
        traffic,
        latency,
        model_usage,
        rate_limiting,
        service_health,
        time_to_first_token,
        time_to_last_token,
        question_length,
        answer_length,
        rejected_requests,
    ) = futures::join!(
        sections::fetch_traffic(backend, window),
        sections::fetch_latency(backend, window),
        sections::fetch_model_usage(backend, window),
        sections::fetch_rate_limiting(backend, window),
        sections::fetch_service_health(backend),
        sections::fetch_time_to_first_token(backend, window),
        sections::fetch_time_to_last_token(backend, window),
        sections::fetch_question_length(backend, window),
        sections::fetch_answer_length(backend, window),
        sections::fetch_rejected_requests(backend, window),
    );

    DashboardMetrics {
        traffic: settle("traffic", traffic, mock::mock_traffic),
        latency: settle("latency", latency, mock::mock_latency),
        model_usage: settle("modelUsage", model_usage, mock::mock_model_usage),
        rate_limiting: settle("rateLimiting", rate_limiting, mock::mock_rate_limiting),
        service_health: settle("serviceHealth", service_health, mock::mock_service_health),
        time_to_first_token: settle(
            "timeToFirstToken",
            time_to_first_token,
            mock::mock_time_to_first_token,
        ),
        time_to_last_token: settle(
            "timeToLastToken",
            time_to_last_token,
            mock::mock_time_to_last_token,
        ),
        question_length: settle("questionLength", question_length, mock::mock_question_length),
        answer_length: settle("answerLength", answer_length, mock::mock_answer_length),
        rejected_requests: settle(
            "rejectedRequests",
            rejected_requests,
            mock::mock_rejected_requests,
        ),
    }
}

/// Turn a pipeline outcome into a section, substituting mock data on failure.
fn settle<T>(
    section: &'static str,
    outcome: Result<T, QueryError>,
    fallback: fn() -> T,
) -> MetricState<T> {
    match outcome {
        Ok(data) => MetricState::live(data),
        Err(e) => {
            tracing::warn!(section, error = %e, "Section fetch failed, serving mock data");
            record_section_fallback(section);
            MetricState::fallback(fallback(), e.to_string())
        }
    }
}
