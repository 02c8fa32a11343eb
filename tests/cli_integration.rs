//! CLI integration tests
//!
//! End-to-end tests for CLI commands using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the lumen binary for testing, isolated from the caller's environment
fn lumen_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lumen").unwrap();
    for var in [
        "METRICS_USE_MOCK",
        "PROMETHEUS_BASE_URL",
        "PROMETHEUS_BEARER_TOKEN",
        "LUMEN_HOST",
        "LUMEN_PORT",
        "LUMEN_LOG_LEVEL",
        "LUMEN_LOG_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_version_output() {
    lumen_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lumen"));
}

#[test]
fn test_help_shows_all_commands() {
    lumen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("snapshot"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_serve_help() {
    lumen_cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--mock"));
}

#[test]
fn test_snapshot_mock_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = lumen_cmd()
        .current_dir(temp_dir.path())
        .args(["snapshot", "--mock", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["rejectedRequests"]["data"]["summary"]["totalRejected"], 24.0);
    assert!(json["traffic"].get("error").is_none());
}

#[test]
fn test_snapshot_without_backend_reports_advisory() {
    let temp_dir = TempDir::new().unwrap();

    lumen_cmd()
        .current_dir(temp_dir.path())
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Traffic"))
        .stdout(predicate::str::contains("Prometheus URL not configured"));
}

#[test]
fn test_snapshot_env_enables_mock() {
    let temp_dir = TempDir::new().unwrap();

    lumen_cmd()
        .current_dir(temp_dir.path())
        .env("METRICS_USE_MOCK", "true")
        .args(["snapshot", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured").not());
}

#[test]
fn test_snapshot_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumen.toml");
    std::fs::write(&config_path, "[prometheus]\nbase_url = \"ftp://prom\"\n").unwrap();

    lumen_cmd()
        .args(["snapshot", "-c", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumen.toml");

    lumen_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[prometheus]"));
    assert!(content.contains("[dashboard]"));
}

#[test]
fn test_config_init_no_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumen.toml");
    std::fs::write(&config_path, "existing content").unwrap();

    lumen_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exists"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(content, "existing content");
}

#[test]
fn test_invalid_command() {
    lumen_cmd()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    lumen_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_completions_zsh() {
    lumen_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compdef"));
}
