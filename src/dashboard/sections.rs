//! One fetch pipeline per dashboard section.
//!
//! Sub-queries of a section run concurrently and the first failure fails the
//! whole section. Isolation between sections is the aggregator's job.

use super::transform::{
    error_rate_indicator, hour_label, last_value, liveness_indicator, mean, mean_of, round_to,
    uptime_indicator, zip_by_index, zip_quantiles,
};
use super::types::*;
use crate::prometheus::{MetricsBackend, PromQuery, QueryError, QueryWindow, SamplePoint};

/// Decimal precision for counts and rates.
const WHOLE: u32 = 0;
/// Decimal precision for sub-second token timings.
const SECONDS: u32 = 2;

pub async fn fetch_traffic(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<TrafficMetrics, QueryError> {
    let (series, concurrent) = futures::try_join!(
        backend.query_range(PromQuery::RequestsPerSecond, window),
        backend.query_instant(PromQuery::ConcurrentRequests),
    )?;

    Ok(TrafficMetrics {
        summary: TrafficSummary {
            requests_per_sec: round_to(mean_of(&series), WHOLE),
            concurrent,
            pending: 0.0,
        },
        series: series
            .iter()
            .map(|point| TrafficPoint {
                time: hour_label(point.timestamp),
                requests: point.value,
                concurrent,
                pending: 0.0,
            })
            .collect(),
    })
}

async fn fetch_quantiles(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
    queries: [PromQuery; 3],
    decimals: u32,
) -> Result<(QuantileSummary, Vec<QuantilePoint>), QueryError> {
    let [q50, q90, q99] = queries;
    let (p50, p90, p99) = futures::try_join!(
        backend.query_range(q50, window),
        backend.query_range(q90, window),
        backend.query_range(q99, window),
    )?;

    let summary = QuantileSummary {
        p50: round_to(last_value(&p50), decimals),
        p90: round_to(last_value(&p90), decimals),
        p99: round_to(last_value(&p99), decimals),
    };

    Ok((summary, zip_quantiles(&p50, &p90, &p99)))
}

pub async fn fetch_latency(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<LatencyMetrics, QueryError> {
    let (summary, series) = fetch_quantiles(
        backend,
        window,
        [
            PromQuery::LatencyP50,
            PromQuery::LatencyP90,
            PromQuery::LatencyP99,
        ],
        WHOLE,
    )
    .await?;

    Ok(LatencyMetrics { summary, series })
}

pub async fn fetch_time_to_first_token(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<TimeToTokenMetrics, QueryError> {
    let (summary, series) = fetch_quantiles(
        backend,
        window,
        [
            PromQuery::TimeToFirstTokenP50,
            PromQuery::TimeToFirstTokenP90,
            PromQuery::TimeToFirstTokenP99,
        ],
        SECONDS,
    )
    .await?;

    Ok(TimeToTokenMetrics { summary, series })
}

pub async fn fetch_time_to_last_token(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<TimeToTokenMetrics, QueryError> {
    let (summary, series) = fetch_quantiles(
        backend,
        window,
        [
            PromQuery::TimeToLastTokenP50,
            PromQuery::TimeToLastTokenP90,
            PromQuery::TimeToLastTokenP99,
        ],
        SECONDS,
    )
    .await?;

    Ok(TimeToTokenMetrics { summary, series })
}

pub async fn fetch_model_usage(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<ModelUsageMetrics, QueryError> {
    let (input, output) = futures::try_join!(
        backend.query_range(PromQuery::TokensIn, window),
        backend.query_range(PromQuery::TokensOut, window),
    )?;

    Ok(ModelUsageMetrics {
        summary: ModelUsageSummary {
            input_tokens: round_to(last_value(&input), WHOLE),
            output_tokens: round_to(last_value(&output), WHOLE),
        },
        series: zip_by_index(&input, &output)
            .into_iter()
            .map(|(time, input, output)| ModelUsagePoint {
                time,
                input,
                output,
            })
            .collect(),
    })
}

pub async fn fetch_rate_limiting(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<RateLimitingMetrics, QueryError> {
    let (allowed, rejected) = futures::try_join!(
        backend.query_range(PromQuery::RequestsPerIp, window),
        backend.query_range(PromQuery::RejectedRequests, window),
    )?;

    let series: Vec<RateLimitingPoint> = zip_by_index(&allowed, &rejected)
        .into_iter()
        .map(|(time, allowed, rejected)| RateLimitingPoint {
            time,
            allowed,
            rejected,
        })
        .collect();
    let rejected_values: Vec<f64> = series.iter().map(|p| p.rejected).collect();

    Ok(RateLimitingMetrics {
        summary: RateLimitingSummary {
            requests_per_ip_avg: round_to(mean_of(&allowed), WHOLE),
            rejected: round_to(mean(&rejected_values), WHOLE),
        },
        series,
    })
}

pub async fn fetch_service_health(
    backend: &dyn MetricsBackend,
) -> Result<ServiceHealthMetrics, QueryError> {
    let (uptime, error_rate, liveness) = futures::try_join!(
        backend.query_instant(PromQuery::Uptime),
        backend.query_instant(PromQuery::ErrorRate),
        backend.query_instant(PromQuery::Liveness),
    )?;

    Ok(ServiceHealthMetrics {
        metrics: vec![
            uptime_indicator(uptime),
            liveness_indicator(liveness),
            error_rate_indicator(error_rate),
        ],
    })
}

fn token_length(series: &[SamplePoint]) -> TokenLengthMetrics {
    TokenLengthMetrics {
        summary: TokenLengthSummary {
            average: round_to(mean_of(series), WHOLE),
        },
        series: series
            .iter()
            .map(|point| TokenLengthPoint {
                time: hour_label(point.timestamp),
                value: point.value,
            })
            .collect(),
    }
}

pub async fn fetch_question_length(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<TokenLengthMetrics, QueryError> {
    let series = backend
        .query_range(PromQuery::QuestionLengthAvg, window)
        .await?;
    Ok(token_length(&series))
}

pub async fn fetch_answer_length(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<TokenLengthMetrics, QueryError> {
    let series = backend
        .query_range(PromQuery::AnswerLengthAvg, window)
        .await?;
    Ok(token_length(&series))
}

pub async fn fetch_rejected_requests(
    backend: &dyn MetricsBackend,
    window: &QueryWindow,
) -> Result<RejectedRequestsMetrics, QueryError> {
    let series = backend
        .query_range(PromQuery::RejectedRequests, window)
        .await?;

    Ok(RejectedRequestsMetrics {
        summary: RejectedRequestsSummary {
            total_rejected: round_to(last_value(&series), WHOLE),
        },
        series: series
            .iter()
            .map(|point| RejectedRequestsPoint {
                time: hour_label(point.timestamp),
                rejected: point.value,
            })
            .collect(),
    })
}
