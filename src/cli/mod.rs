//! CLI module for Lumen
//!
//! Command-line interface definitions and handlers for the metrics dashboard.
//!
//! # Commands
//!
//! - `serve` - Start the dashboard API server
//! - `snapshot` - Fetch one dashboard snapshot and print it
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server against a Prometheus instance
//! PROMETHEUS_BASE_URL=http://prometheus:9090 lumen serve
//!
//! # Print the mock snapshot as JSON
//! lumen snapshot --mock --json
//!
//! # Generate shell completions
//! lumen completions bash > ~/.bash_completion.d/lumen
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod snapshot;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lumen - LLM serving metrics dashboard
#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "Metrics dashboard backend for LLM serving deployments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard API server
    Serve(ServeArgs),
    /// Fetch one dashboard snapshot
    Snapshot(SnapshotArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "lumen.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "LUMEN_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "LUMEN_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LUMEN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Serve mock data regardless of backend configuration
    #[arg(long)]
    pub mock: bool,
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "lumen.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Use mock data instead of querying the backend
    #[arg(long)]
    pub mock: bool,

    /// Query window in hours
    #[arg(long)]
    pub range_hours: Option<u32>,

    /// Sampling step in seconds
    #[arg(long)]
    pub step_seconds: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "lumen.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["lumen", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("lumen.toml"));
                assert!(!args.mock);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "lumen", "serve", "-p", "9000", "-H", "127.0.0.1", "-c", "custom.toml", "--mock",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.config, PathBuf::from("custom.toml"));
                assert!(args.mock);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_snapshot() {
        let cli = Cli::try_parse_from([
            "lumen",
            "snapshot",
            "--json",
            "--range-hours",
            "6",
            "--step-seconds",
            "600",
        ])
        .unwrap();
        match cli.command {
            Commands::Snapshot(args) => {
                assert!(args.json);
                assert!(!args.mock);
                assert_eq!(args.range_hours, Some(6));
                assert_eq!(args.step_seconds, Some(600));
            }
            _ => panic!("Expected Snapshot command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["lumen", "config", "init", "-o", "out.toml", "--force"])
            .unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert_eq!(args.output, PathBuf::from("out.toml"));
                assert!(args.force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["lumen", "backends"]).is_err());
    }
}
