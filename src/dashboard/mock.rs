//! Static representative data for every section.
//!
//! Served when mock mode is on, when no backend is configured, and as the
//! per-section fallback when a live fetch fails.

use super::types::*;

const HOURS: [&str; 6] = ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"];

pub fn mock_traffic() -> TrafficMetrics {
    let rows = [
        (1200.0, 45.0, 3.0),
        (980.0, 38.0, 2.0),
        (2400.0, 89.0, 5.0),
        (3200.0, 124.0, 8.0),
        (2800.0, 102.0, 6.0),
        (1800.0, 67.0, 4.0),
    ];

    TrafficMetrics {
        summary: TrafficSummary {
            requests_per_sec: 3247.0,
            concurrent: 124.0,
            pending: 8.0,
        },
        series: HOURS
            .iter()
            .zip(rows)
            .map(|(time, (requests, concurrent, pending))| TrafficPoint {
                time: time.to_string(),
                requests,
                concurrent,
                pending,
            })
            .collect(),
    }
}

fn quantile_series(rows: [(f64, f64, f64); 6]) -> Vec<QuantilePoint> {
    HOURS
        .iter()
        .zip(rows)
        .map(|(time, (p50, p90, p99))| QuantilePoint {
            time: time.to_string(),
            p50,
            p90,
            p99,
        })
        .collect()
}

pub fn mock_latency() -> LatencyMetrics {
    LatencyMetrics {
        summary: QuantileSummary {
            p50: 58.0,
            p90: 112.0,
            p99: 198.0,
        },
        series: quantile_series([
            (45.0, 89.0, 156.0),
            (38.0, 76.0, 142.0),
            (52.0, 98.0, 178.0),
            (58.0, 112.0, 198.0),
            (48.0, 94.0, 168.0),
            (42.0, 84.0, 152.0),
        ]),
    }
}

pub fn mock_model_usage() -> ModelUsageMetrics {
    let rows = [
        (145_000.0, 98_000.0),
        (112_000.0, 76_000.0),
        (234_000.0, 156_000.0),
        (298_000.0, 198_000.0),
        (267_000.0, 178_000.0),
        (189_000.0, 126_000.0),
    ];

    ModelUsageMetrics {
        summary: ModelUsageSummary {
            input_tokens: 298_000.0,
            output_tokens: 198_000.0,
        },
        series: HOURS
            .iter()
            .zip(rows)
            .map(|(time, (input, output))| ModelUsagePoint {
                time: time.to_string(),
                input,
                output,
            })
            .collect(),
    }
}

pub fn mock_rate_limiting() -> RateLimitingMetrics {
    let rows = [
        (2800.0, 12.0),
        (2300.0, 8.0),
        (4200.0, 28.0),
        (5100.0, 42.0),
        (4500.0, 35.0),
        (3200.0, 18.0),
    ];

    RateLimitingMetrics {
        summary: RateLimitingSummary {
            requests_per_ip_avg: 127.0,
            rejected: 42.0,
        },
        series: HOURS
            .iter()
            .zip(rows)
            .map(|(time, (allowed, rejected))| RateLimitingPoint {
                time: time.to_string(),
                allowed,
                rejected,
            })
            .collect(),
    }
}

pub fn mock_service_health() -> ServiceHealthMetrics {
    let metric = |label: &str, value: &str| ServiceHealthMetric {
        label: label.to_string(),
        value: value.to_string(),
        status: HealthStatus::Healthy,
    };

    ServiceHealthMetrics {
        metrics: vec![
            metric("Uptime", "99.98%"),
            metric("Liveness", "Active"),
            metric("Error Rate", "0.02%"),
        ],
    }
}

pub fn mock_time_to_first_token() -> TimeToTokenMetrics {
    TimeToTokenMetrics {
        summary: QuantileSummary {
            p50: 0.34,
            p90: 0.72,
            p99: 1.25,
        },
        series: quantile_series([
            (0.28, 0.58, 0.98),
            (0.32, 0.64, 1.05),
            (0.38, 0.76, 1.28),
            (0.34, 0.72, 1.25),
            (0.3, 0.68, 1.18),
            (0.29, 0.61, 1.02),
        ]),
    }
}

pub fn mock_time_to_last_token() -> TimeToTokenMetrics {
    TimeToTokenMetrics {
        summary: QuantileSummary {
            p50: 2.15,
            p90: 4.32,
            p99: 8.45,
        },
        series: quantile_series([
            (1.98, 3.98, 7.82),
            (2.08, 4.12, 8.05),
            (2.22, 4.45, 8.68),
            (2.15, 4.32, 8.45),
            (2.05, 4.15, 8.25),
            (2.02, 4.08, 8.12),
        ]),
    }
}

fn token_length(average: f64, values: [f64; 6]) -> TokenLengthMetrics {
    TokenLengthMetrics {
        summary: TokenLengthSummary { average },
        series: HOURS
            .iter()
            .zip(values)
            .map(|(time, value)| TokenLengthPoint {
                time: time.to_string(),
                value,
            })
            .collect(),
    }
}

pub fn mock_question_length() -> TokenLengthMetrics {
    token_length(187.0, [156.0, 168.0, 192.0, 187.0, 178.0, 165.0])
}

pub fn mock_answer_length() -> TokenLengthMetrics {
    token_length(523.0, [478.0, 492.0, 548.0, 523.0, 512.0, 485.0])
}

pub fn mock_rejected_requests() -> RejectedRequestsMetrics {
    RejectedRequestsMetrics {
        summary: RejectedRequestsSummary {
            total_rejected: 24.0,
        },
        series: HOURS
            .iter()
            .zip([4.0, 3.0, 8.0, 24.0, 18.0, 12.0])
            .map(|(time, rejected)| RejectedRequestsPoint {
                time: time.to_string(),
                rejected,
            })
            .collect(),
    }
}

/// The complete mock snapshot, no errors attached.
pub fn mock_dashboard_metrics() -> DashboardMetrics {
    DashboardMetrics {
        traffic: MetricState::live(mock_traffic()),
        latency: MetricState::live(mock_latency()),
        model_usage: MetricState::live(mock_model_usage()),
        rate_limiting: MetricState::live(mock_rate_limiting()),
        service_health: MetricState::live(mock_service_health()),
        time_to_first_token: MetricState::live(mock_time_to_first_token()),
        time_to_last_token: MetricState::live(mock_time_to_last_token()),
        question_length: MetricState::live(mock_question_length()),
        answer_length: MetricState::live(mock_answer_length()),
        rejected_requests: MetricState::live(mock_rejected_requests()),
    }
}

/// The mock snapshot with the same advisory on every section.
pub fn mock_dashboard_metrics_with_error(error: &str) -> DashboardMetrics {
    DashboardMetrics {
        traffic: MetricState::fallback(mock_traffic(), error),
        latency: MetricState::fallback(mock_latency(), error),
        model_usage: MetricState::fallback(mock_model_usage(), error),
        rate_limiting: MetricState::fallback(mock_rate_limiting(), error),
        service_health: MetricState::fallback(mock_service_health(), error),
        time_to_first_token: MetricState::fallback(mock_time_to_first_token(), error),
        time_to_last_token: MetricState::fallback(mock_time_to_last_token(), error),
        question_length: MetricState::fallback(mock_question_length(), error),
        answer_length: MetricState::fallback(mock_answer_length(), error),
        rejected_requests: MetricState::fallback(mock_rejected_requests(), error),
    }
}
