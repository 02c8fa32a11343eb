//! Named PromQL expressions behind every dashboard panel.
//!
//! These are fixed configuration constants; nothing here is built from user
//! input.

use std::fmt;

/// One raw signal the dashboard reads from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromQuery {
    RequestsPerSecond,
    ConcurrentRequests,
    RejectedRequests,
    RequestsPerIp,
    LatencyP50,
    LatencyP90,
    LatencyP99,
    TokensIn,
    TokensOut,
    TimeToFirstTokenP50,
    TimeToFirstTokenP90,
    TimeToFirstTokenP99,
    TimeToLastTokenP50,
    TimeToLastTokenP90,
    TimeToLastTokenP99,
    QuestionLengthAvg,
    AnswerLengthAvg,
    Uptime,
    ErrorRate,
    Liveness,
}

impl PromQuery {
    pub const ALL: [PromQuery; 20] = [
        PromQuery::RequestsPerSecond,
        PromQuery::ConcurrentRequests,
        PromQuery::RejectedRequests,
        PromQuery::RequestsPerIp,
        PromQuery::LatencyP50,
        PromQuery::LatencyP90,
        PromQuery::LatencyP99,
        PromQuery::TokensIn,
        PromQuery::TokensOut,
        PromQuery::TimeToFirstTokenP50,
        PromQuery::TimeToFirstTokenP90,
        PromQuery::TimeToFirstTokenP99,
        PromQuery::TimeToLastTokenP50,
        PromQuery::TimeToLastTokenP90,
        PromQuery::TimeToLastTokenP99,
        PromQuery::QuestionLengthAvg,
        PromQuery::AnswerLengthAvg,
        PromQuery::Uptime,
        PromQuery::ErrorRate,
        PromQuery::Liveness,
    ];

    /// The PromQL expression sent to the backend.
    pub fn expr(self) -> &'static str {
        match self {
            PromQuery::RequestsPerSecond => "sum(rate(http_requests_total[5m]))",
            PromQuery::ConcurrentRequests => "sum(http_requests_in_flight)",
            PromQuery::RejectedRequests => "sum(rate(rejected_requests_total[5m]))",
            PromQuery::RequestsPerIp => "sum(rate(requests_per_ip_total[5m]))",
            PromQuery::LatencyP50 => {
                "histogram_quantile(0.5, sum(rate(http_request_duration_seconds_bucket[5m])) by (le))"
            }
            PromQuery::LatencyP90 => {
                "histogram_quantile(0.9, sum(rate(http_request_duration_seconds_bucket[5m])) by (le))"
            }
            PromQuery::LatencyP99 => {
                "histogram_quantile(0.99, sum(rate(http_request_duration_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TokensIn => "sum(rate(model_tokens_in_total[5m]))",
            PromQuery::TokensOut => "sum(rate(model_tokens_out_total[5m]))",
            PromQuery::TimeToFirstTokenP50 => {
                "histogram_quantile(0.5, sum(rate(llm_time_to_first_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TimeToFirstTokenP90 => {
                "histogram_quantile(0.9, sum(rate(llm_time_to_first_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TimeToFirstTokenP99 => {
                "histogram_quantile(0.99, sum(rate(llm_time_to_first_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TimeToLastTokenP50 => {
                "histogram_quantile(0.5, sum(rate(llm_time_to_last_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TimeToLastTokenP90 => {
                "histogram_quantile(0.9, sum(rate(llm_time_to_last_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::TimeToLastTokenP99 => {
                "histogram_quantile(0.99, sum(rate(llm_time_to_last_token_seconds_bucket[5m])) by (le))"
            }
            PromQuery::QuestionLengthAvg => {
                "avg_over_time(llm_question_length_chars_sum[1h]) / avg_over_time(llm_question_length_chars_count[1h])"
            }
            PromQuery::AnswerLengthAvg => {
                "avg_over_time(llm_answer_length_chars_sum[1h]) / avg_over_time(llm_answer_length_chars_count[1h])"
            }
            PromQuery::Uptime => "avg_over_time(up[1h])",
            PromQuery::ErrorRate => {
                "sum(rate(http_request_errors_total[5m])) / sum(rate(http_requests_total[5m]))"
            }
            PromQuery::Liveness => "up",
        }
    }

    /// Stable identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            PromQuery::RequestsPerSecond => "requests_per_second",
            PromQuery::ConcurrentRequests => "concurrent_requests",
            PromQuery::RejectedRequests => "rejected_requests",
            PromQuery::RequestsPerIp => "requests_per_ip",
            PromQuery::LatencyP50 => "latency_p50",
            PromQuery::LatencyP90 => "latency_p90",
            PromQuery::LatencyP99 => "latency_p99",
            PromQuery::TokensIn => "tokens_in",
            PromQuery::TokensOut => "tokens_out",
            PromQuery::TimeToFirstTokenP50 => "time_to_first_token_p50",
            PromQuery::TimeToFirstTokenP90 => "time_to_first_token_p90",
            PromQuery::TimeToFirstTokenP99 => "time_to_first_token_p99",
            PromQuery::TimeToLastTokenP50 => "time_to_last_token_p50",
            PromQuery::TimeToLastTokenP90 => "time_to_last_token_p90",
            PromQuery::TimeToLastTokenP99 => "time_to_last_token_p99",
            PromQuery::QuestionLengthAvg => "question_length_avg",
            PromQuery::AnswerLengthAvg => "answer_length_avg",
            PromQuery::Uptime => "uptime",
            PromQuery::ErrorRate => "error_rate",
            PromQuery::Liveness => "liveness",
        }
    }
}

impl fmt::Display for PromQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
