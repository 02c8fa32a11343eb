//! # Self-Instrumentation
//!
//! Lumen reads metrics from Prometheus, and it also exports its own so the
//! dashboard service can be scraped like anything else.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `lumen_backend_queries_total{kind, outcome}` - Backend queries by result
//! - `lumen_section_fallbacks_total{section}` - Sections served from mock data after a failure
//! - `lumen_snapshots_total{source}` - Snapshots built (`live`, `mock`, `unconfigured`)
//!
//! **Histograms:**
//! - `lumen_backend_query_duration_seconds{kind}` - Backend query latency

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use crate::prometheus::QueryKind;
use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Duration;

/// Where the sections of a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Live,
    Mock,
    Unconfigured,
}

impl SnapshotSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotSource::Live => "live",
            SnapshotSource::Mock => "mock",
            SnapshotSource::Unconfigured => "unconfigured",
        }
    }
}

/// Record one backend query.
pub fn record_backend_query(kind: QueryKind, outcome: &'static str, elapsed: Duration) {
    metrics::counter!("lumen_backend_queries_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("lumen_backend_query_duration_seconds",
        "kind" => kind.as_str()
    )
    .record(elapsed.as_secs_f64());
}

/// Record a section served from fallback data.
pub fn record_section_fallback(section: &'static str) {
    metrics::counter!("lumen_section_fallbacks_total", "section" => section).increment(1);
}

/// Record a completed snapshot.
pub fn record_snapshot(source: SnapshotSource) {
    metrics::counter!("lumen_snapshots_total", "source" => source.as_str()).increment(1);
}

/// Initialize the Prometheus exporter with buckets sized for backend queries.
///
/// Buckets: [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1, 2.5, 5, 10, 30] seconds.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let query_buckets = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("lumen_backend_query_duration_seconds".to_string()),
            query_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Install the global recorder, or fall back to a detached handle when one
/// is already installed (tests build many app states per process).
pub fn setup_metrics_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    static INIT: Once = Once::new();
    static TEST_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    fn get_test_handle() -> PrometheusHandle {
        INIT.call_once(|| {
            // Use build_recorder which doesn't need a runtime
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            *TEST_HANDLE.lock().unwrap() = Some(handle);

            // Install the recorder globally (only once for all tests)
            metrics::set_global_recorder(Box::new(recorder)).ok();
        });

        TEST_HANDLE.lock().unwrap().as_ref().unwrap().clone()
    }

    #[test]
    fn test_snapshot_source_labels() {
        assert_eq!(SnapshotSource::Live.as_str(), "live");
        assert_eq!(SnapshotSource::Mock.as_str(), "mock");
        assert_eq!(SnapshotSource::Unconfigured.as_str(), "unconfigured");
    }

    #[test]
    fn test_recorded_metrics_render() {
        let handle = get_test_handle();

        record_backend_query(QueryKind::Range, "success", Duration::from_millis(12));
        record_section_fallback("latency");
        record_snapshot(SnapshotSource::Live);

        let rendered = handle.render();
        // Another test binary may own the global recorder; only assert when ours is live.
        if rendered.contains("lumen_") {
            assert!(rendered.contains("lumen_backend_queries_total"));
            assert!(rendered.contains("lumen_section_fallbacks_total"));
        }
    }
}
