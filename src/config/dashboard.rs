//! Snapshot defaults

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Default query window: one day.
pub const DEFAULT_RANGE_HOURS: u32 = 24;

/// Longest window a snapshot may ask for: 90 days.
pub const MAX_RANGE_HOURS: u32 = 90 * 24;

/// Default sampling step: four hours, six points per day.
pub const DEFAULT_STEP_SECONDS: u64 = 4 * 60 * 60;

/// Defaults applied when a snapshot request leaves an option unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Serve the static mock snapshot instead of querying the backend
    pub use_mock: bool,
    pub range_hours: u32,
    pub step_seconds: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            use_mock: false,
            range_hours: DEFAULT_RANGE_HOURS,
            step_seconds: DEFAULT_STEP_SECONDS,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range_hours == 0 {
            return Err(ConfigError::invalid(
                "dashboard.range_hours",
                "range must be positive",
            ));
        }
        if self.range_hours > MAX_RANGE_HOURS {
            return Err(ConfigError::invalid(
                "dashboard.range_hours",
                "range cannot exceed 2160 hours (90 days)",
            ));
        }
        if self.step_seconds == 0 {
            return Err(ConfigError::invalid(
                "dashboard.step_seconds",
                "step must be positive",
            ));
        }
        Ok(())
    }
}

/// Interpret a mock flag the way deployments set it: anything but
/// `false` or `0` turns mock mode on.
pub fn parse_mock_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}
