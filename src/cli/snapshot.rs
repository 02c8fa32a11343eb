//! Snapshot command implementation

use crate::cli::output::{format_snapshot_json, format_snapshot_table};
use crate::cli::SnapshotArgs;
use crate::config::LumenConfig;
use crate::dashboard::{DashboardOptions, MetricsAggregator};

/// Load configuration for a one-off snapshot
pub fn load_snapshot_config(
    args: &SnapshotArgs,
) -> Result<LumenConfig, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        LumenConfig::load(Some(&args.config))?
    } else {
        LumenConfig::default()
    };
    let config = config.with_env_overrides();

    config.validate()?;
    Ok(config)
}

/// Handle `lumen snapshot`
///
/// Returns the rendered output. Backend failures never make this fail: they
/// show up as per-section errors, exactly as the API would report them.
pub async fn handle_snapshot(args: &SnapshotArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_snapshot_config(args)?;
    let aggregator = MetricsAggregator::from_config(&config)?;

    let options = DashboardOptions {
        use_mock: args.mock.then_some(true),
        range_hours: args.range_hours,
        step_seconds: args.step_seconds,
    };
    let snapshot = aggregator.get_dashboard_metrics(options).await;

    if args.json {
        Ok(format_snapshot_json(&snapshot)?)
    } else {
        Ok(format_snapshot_table(&snapshot))
    }
}
