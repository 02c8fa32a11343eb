//! Pure helpers that turn raw samples into dashboard values.

use super::types::{HealthStatus, QuantilePoint, ServiceHealthMetric};
use crate::prometheus::SamplePoint;
use chrono::{DateTime, Timelike};

/// Error rates above this fraction turn the indicator to `warning`.
pub const ERROR_RATE_WARNING_THRESHOLD: f64 = 0.05;

/// Hour-of-day label (`HH:00`, UTC) for a unix timestamp in seconds.
///
/// Lossy: samples from different days share a label.
pub fn hour_label(ts_seconds: f64) -> String {
    let hour = DateTime::from_timestamp(ts_seconds.floor() as i64, 0)
        .map(|dt| dt.hour())
        .unwrap_or(0);
    format!("{:02}:00", hour)
}

/// Parse an `HH:00` label back to its hour.
pub fn label_hour(label: &str) -> Option<u32> {
    let (hour, minutes) = label.split_once(':')?;
    if minutes != "00" || hour.len() != 2 {
        return None;
    }
    hour.parse().ok().filter(|h| *h < 24)
}

/// Arithmetic mean; 0 for no values.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the sample values.
pub fn mean_of(points: &[SamplePoint]) -> f64 {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    mean(&values)
}

/// Value of the last sample; 0 for an empty series.
pub fn last_value(points: &[SamplePoint]) -> f64 {
    points.last().map_or(0.0, |p| p.value)
}

/// Round to a fixed number of decimals, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Value of `secondary` at `index`, or the co-indexed primary value when
/// `secondary` is shorter.
fn co_indexed(secondary: &[SamplePoint], index: usize, primary: &SamplePoint) -> f64 {
    secondary.get(index).map_or(primary.value, |p| p.value)
}

/// Pair two series position by position.
///
/// `primary` decides the length and the time labels. Timestamps are not
/// compared: series queried with the same window and step are assumed aligned.
pub fn zip_by_index(primary: &[SamplePoint], secondary: &[SamplePoint]) -> Vec<(String, f64, f64)> {
    primary
        .iter()
        .enumerate()
        .map(|(i, point)| {
            (
                hour_label(point.timestamp),
                point.value,
                co_indexed(secondary, i, point),
            )
        })
        .collect()
}

/// Merge p50/p90/p99 series position by position, p50 driving the output.
pub fn zip_quantiles(
    p50: &[SamplePoint],
    p90: &[SamplePoint],
    p99: &[SamplePoint],
) -> Vec<QuantilePoint> {
    p50.iter()
        .enumerate()
        .map(|(i, point)| QuantilePoint {
            time: hour_label(point.timestamp),
            p50: point.value,
            p90: co_indexed(p90, i, point),
            p99: co_indexed(p99, i, point),
        })
        .collect()
}

/// `healthy` up to and including 5% errors, `warning` above.
pub fn classify_error_rate(rate: f64) -> HealthStatus {
    if rate > ERROR_RATE_WARNING_THRESHOLD {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Uptime indicator. Always reported healthy; the value is informational.
pub fn uptime_indicator(uptime: f64) -> ServiceHealthMetric {
    ServiceHealthMetric {
        label: "Uptime".to_string(),
        value: percent(uptime),
        status: HealthStatus::Healthy,
    }
}

pub fn liveness_indicator(liveness: f64) -> ServiceHealthMetric {
    let (value, status) = if liveness > 0.0 {
        ("Active", HealthStatus::Healthy)
    } else {
        ("Down", HealthStatus::Critical)
    };
    ServiceHealthMetric {
        label: "Liveness".to_string(),
        value: value.to_string(),
        status,
    }
}

pub fn error_rate_indicator(rate: f64) -> ServiceHealthMetric {
    ServiceHealthMetric {
        label: "Error Rate".to_string(),
        value: percent(rate),
        status: classify_error_rate(rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[f64]) -> Vec<SamplePoint> {
        // 2024-01-01T00:00:00Z, four-hour step
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SamplePoint::new(1_704_067_200.0 + i as f64 * 14_400.0, *v))
            .collect()
    }

    #[test]
    fn test_hour_label_utc() {
        assert_eq!(hour_label(1_704_067_200.0), "00:00");
        assert_eq!(hour_label(1_704_067_200.0 + 4.0 * 3600.0), "04:00");
        assert_eq!(hour_label(1_704_067_200.0 + 23.0 * 3600.0 + 59.9), "23:00");
    }

    #[test]
    fn test_label_hour_rejects_garbage() {
        assert_eq!(label_hour("08:00"), Some(8));
        assert_eq!(label_hour("24:00"), None);
        assert_eq!(label_hour("8:00"), None);
        assert_eq!(label_hour("08:30"), None);
        assert_eq!(label_hour("noon"), None);
    }

    #[test]
    fn test_mean_of_traffic_series() {
        let avg = mean(&[1200.0, 980.0, 2400.0, 3200.0, 2800.0, 1800.0]);
        assert_eq!(round_to(avg, 0), 2063.0);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean_of(&[]), 0.0);
        assert_eq!(last_value(&[]), 0.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to(0.346, 2), 0.35);
        assert_eq!(round_to(1.2449, 2), 1.24);
        assert_eq!(round_to(57.5, 0), 58.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_zip_quantiles_falls_back_to_p50() {
        let merged = zip_quantiles(&points(&[10.0, 20.0]), &points(&[15.0]), &[]);

        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].p50, merged[0].p90, merged[0].p99), (10.0, 15.0, 10.0));
        assert_eq!((merged[1].p50, merged[1].p90, merged[1].p99), (20.0, 20.0, 20.0));
        assert_eq!(merged[1].time, "04:00");
    }

    #[test]
    fn test_zip_quantiles_ignores_longer_secondaries() {
        let merged = zip_quantiles(&points(&[1.0]), &points(&[2.0, 3.0]), &points(&[4.0, 5.0]));
        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].p90, merged[0].p99), (2.0, 4.0));
    }

    #[test]
    fn test_zip_by_index_pairs_positionally() {
        let pairs = zip_by_index(&points(&[100.0, 200.0, 300.0]), &points(&[1.0, 2.0]));
        assert_eq!(
            pairs,
            vec![
                ("00:00".to_string(), 100.0, 1.0),
                ("04:00".to_string(), 200.0, 2.0),
                ("08:00".to_string(), 300.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_error_rate_boundary() {
        assert_eq!(classify_error_rate(0.05), HealthStatus::Healthy);
        assert_eq!(classify_error_rate(0.0501), HealthStatus::Warning);
        assert_eq!(classify_error_rate(0.0), HealthStatus::Healthy);
    }

    #[test]
    fn test_health_indicators() {
        let uptime = uptime_indicator(0.9998);
        assert_eq!(uptime.value, "99.98%");
        assert_eq!(uptime.status, HealthStatus::Healthy);

        // Uptime status never derives from its value
        assert_eq!(uptime_indicator(0.1).status, HealthStatus::Healthy);

        assert_eq!(liveness_indicator(1.0).value, "Active");
        let down = liveness_indicator(0.0);
        assert_eq!((down.value.as_str(), down.status), ("Down", HealthStatus::Critical));

        let errors = error_rate_indicator(0.0723);
        assert_eq!(errors.value, "7.23%");
        assert_eq!(errors.status, HealthStatus::Warning);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Hour labels survive a round trip for any second of a UTC day.
            #[test]
            fn prop_hour_label_round_trip(offset in 0u32..86_400) {
                let day_start = 1_704_067_200.0;
                let ts = day_start + f64::from(offset);
                let label = hour_label(ts);
                prop_assert_eq!(label_hour(&label), Some(offset / 3600));
                prop_assert_eq!(hour_label(day_start + f64::from(offset / 3600 * 3600)), label);
            }

            /// Output length follows p50; missing co-indexed values copy p50.
            #[test]
            fn prop_zip_length_and_fallback(
                p50 in prop::collection::vec(0.0f64..1e6, 0..12),
                p90 in prop::collection::vec(0.0f64..1e6, 0..12),
            ) {
                let merged = zip_quantiles(&points(&p50), &points(&p90), &[]);
                prop_assert_eq!(merged.len(), p50.len());
                for (i, point) in merged.iter().enumerate() {
                    prop_assert_eq!(point.p99, p50[i]);
                    let expected_p90 = p90.get(i).copied().unwrap_or(p50[i]);
                    prop_assert_eq!(point.p90, expected_p90);
                }
            }
        }
    }
}
