//! Output formatting helpers for CLI commands

use crate::dashboard::types::{HealthStatus, QuantileSummary};
use crate::dashboard::{DashboardMetrics, MetricState};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// View model for one dashboard section
#[derive(Debug, Clone, serde::Serialize)]
pub struct SectionView {
    pub name: &'static str,
    pub summary: String,
    pub points: usize,
    pub error: Option<String>,
}

impl SectionView {
    fn new<T>(
        name: &'static str,
        state: &MetricState<T>,
        summarize: impl Fn(&T) -> String,
        points: impl Fn(&T) -> usize,
    ) -> Self {
        Self {
            name,
            summary: state.data.as_ref().map_or_else(|| "-".to_string(), &summarize),
            points: state.data.as_ref().map_or(0, &points),
            error: state.error.clone(),
        }
    }
}

fn quantiles(summary: &QuantileSummary, unit: &str) -> String {
    format!(
        "p50 {}{unit} / p90 {}{unit} / p99 {}{unit}",
        summary.p50, summary.p90, summary.p99
    )
}

/// One view per section, in display order
pub fn section_views(snapshot: &DashboardMetrics) -> Vec<SectionView> {
    vec![
        SectionView::new(
            "Traffic",
            &snapshot.traffic,
            |t| {
                format!(
                    "{} req/s, {} concurrent, {} pending",
                    t.summary.requests_per_sec, t.summary.concurrent, t.summary.pending
                )
            },
            |t| t.series.len(),
        ),
        SectionView::new(
            "Latency",
            &snapshot.latency,
            |l| quantiles(&l.summary, "ms"),
            |l| l.series.len(),
        ),
        SectionView::new(
            "Model Usage",
            &snapshot.model_usage,
            |m| {
                format!(
                    "{} in / {} out tokens",
                    m.summary.input_tokens, m.summary.output_tokens
                )
            },
            |m| m.series.len(),
        ),
        SectionView::new(
            "Rate Limiting",
            &snapshot.rate_limiting,
            |r| {
                format!(
                    "{} req/IP avg, {} rejected",
                    r.summary.requests_per_ip_avg, r.summary.rejected
                )
            },
            |r| r.series.len(),
        ),
        SectionView::new(
            "Service Health",
            &snapshot.service_health,
            |h| {
                h.metrics
                    .iter()
                    .map(|m| format!("{} {}", m.label, m.value))
                    .collect::<Vec<_>>()
                    .join(", ")
            },
            |_| 0,
        ),
        SectionView::new(
            "Time to First Token",
            &snapshot.time_to_first_token,
            |t| quantiles(&t.summary, "s"),
            |t| t.series.len(),
        ),
        SectionView::new(
            "Time to Last Token",
            &snapshot.time_to_last_token,
            |t| quantiles(&t.summary, "s"),
            |t| t.series.len(),
        ),
        SectionView::new(
            "Question Length",
            &snapshot.question_length,
            |q| format!("avg {} tokens", q.summary.average),
            |q| q.series.len(),
        ),
        SectionView::new(
            "Answer Length",
            &snapshot.answer_length,
            |a| format!("avg {} tokens", a.summary.average),
            |a| a.series.len(),
        ),
        SectionView::new(
            "Rejected Requests",
            &snapshot.rejected_requests,
            |r| format!("{} rejected", r.summary.total_rejected),
            |r| r.series.len(),
        ),
    ]
}

/// Format a snapshot as tables: one row per section, then the health indicators
pub fn format_snapshot_table(snapshot: &DashboardMetrics) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Section", "Source", "Summary", "Points", "Error"]);

    for view in section_views(snapshot) {
        let source = if view.error.is_some() {
            "Fallback".yellow().to_string()
        } else {
            "Live".green().to_string()
        };

        table.add_row(vec![
            Cell::new(view.name),
            Cell::new(source),
            Cell::new(&view.summary),
            Cell::new(view.points),
            Cell::new(view.error.as_deref().map_or_else(String::new, |e| e.red().to_string())),
        ]);
    }

    let mut output = table.to_string();

    if let Some(health) = &snapshot.service_health.data {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Indicator", "Value", "Status"]);
        for metric in &health.metrics {
            table.add_row(vec![
                Cell::new(&metric.label),
                Cell::new(&metric.value),
                Cell::new(format!(
                    "{} {}",
                    status_icon(metric.status),
                    colored_status(metric.status)
                )),
            ]);
        }
        output.push('\n');
        output.push_str(&table.to_string());
    }

    output
}

/// Format a snapshot as the same JSON the API serves
pub fn format_snapshot_json(snapshot: &DashboardMetrics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

fn colored_status(status: HealthStatus) -> String {
    match status {
        HealthStatus::Healthy => "healthy".green().to_string(),
        HealthStatus::Warning => "warning".yellow().to_string(),
        HealthStatus::Critical => "critical".red().to_string(),
    }
}

/// Get status icon for a health indicator
pub fn status_icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "✓",
        HealthStatus::Warning => "!",
        HealthStatus::Critical => "✗",
    }
}
