//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::LumenConfig;
use crate::dashboard::MetricsAggregator;
use crate::logging::init_tracing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<LumenConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        LumenConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        LumenConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.mock {
        config.dashboard.use_mock = true;
    }

    Ok(config)
}

/// Build API router along with its state
fn build_api_router(
    aggregator: Arc<MetricsAggregator>,
    config: Arc<LumenConfig>,
) -> (axum::Router, Arc<AppState>) {
    let app_state = Arc::new(AppState::new(aggregator, config));
    let router = create_router(Arc::clone(&app_state));
    (router, app_state)
}

/// Wait for SIGINT or SIGTERM, then cancel `cancel_token`.
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load, merge and validate configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting Lumen dashboard server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Wire the metrics backend
    let aggregator = Arc::new(MetricsAggregator::from_config(&config)?);
    if config.dashboard.use_mock {
        tracing::info!("Mock mode enabled by default");
    } else if !aggregator.backend_configured() {
        tracing::warn!("No Prometheus base URL configured, snapshots will carry mock data");
    }

    // 4. Build API router
    let addr = config.server.bind_addr();
    let (app, _state) = build_api_router(aggregator, Arc::new(config));

    // 5. Bind and serve until a shutdown signal arrives
    let cancel_token = CancellationToken::new();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Lumen API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    tracing::info!("Lumen server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn args(config: PathBuf) -> ServeArgs {
        ServeArgs {
            config,
            port: None,
            host: None,
            log_level: None,
            mock: false,
        }
    }

    #[tokio::test]
    async fn test_serve_config_loading() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = load_config_with_overrides(&args(temp.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_serve_cli_overrides_config() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080\n[dashboard]\nuse_mock = false").unwrap();

        let mut serve_args = args(temp.path().to_path_buf());
        serve_args.port = Some(9000);
        serve_args.mock = true;

        let config = load_config_with_overrides(&serve_args).unwrap();
        assert_eq!(config.server.port, 9000); // CLI wins
        assert!(config.dashboard.use_mock);
    }

    #[tokio::test]
    async fn test_serve_works_without_config_file() {
        let config = load_config_with_overrides(&args(PathBuf::from("nonexistent.toml"))).unwrap();
        assert_eq!(config.server.request_timeout_seconds, 60); // Default
    }

    #[tokio::test]
    async fn test_serve_rejects_invalid_config_file() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        assert!(load_config_with_overrides(&args(temp.path().to_path_buf())).is_err());
    }

    #[tokio::test]
    async fn test_shutdown_signal_returns_when_cancelled() {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel_clone.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), shutdown_signal(cancel)).await;
        assert!(result.is_ok(), "Shutdown didn't trigger");

        handle.await.unwrap();
    }
}
