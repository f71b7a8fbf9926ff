//! CLI smoke tests for the orgadmin-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and basic command functionality.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

const AUTH_SECTION: &str = r#"
modules:
  auth:
    jwt_secret: "0123456789abcdef0123456789abcdef"
"#;

/// Helper to run the orgadmin-server binary with given arguments
fn run_orgadmin_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_orgadmin-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute orgadmin-server")
}

/// Helper to run the orgadmin-server binary with timeout
async fn run_orgadmin_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_orgadmin-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Config with the home directory inside `dir` so nothing leaks into `$HOME`.
fn write_config(dir: &Path, name: &str, body: &str) -> String {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let content =
        format!("server:\n  home_dir: \"{home}\"\n  host: \"127.0.0.1\"\n  port: 0\n{body}");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_orgadmin_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("orgadmin-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_orgadmin_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("orgadmin-server 0.1.0"), "{stdout}");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_orgadmin_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "{stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_orgadmin_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"), "{stderr}");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_orgadmin_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "{stderr}");
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!(
        r#"
database:
  url: "sqlite://database/orgadmin.db"

logging:
  default:
    console_level: info
    file: ""
{AUTH_SECTION}"#
    );
    let config_path = write_config(temp_dir.path(), "valid.yaml", &body);

    let output = run_orgadmin_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "STDOUT: {stdout}\nSTDERR: {stderr}");
    assert!(stdout.contains("Configuration check passed"));
}

#[test]
fn test_cli_check_requires_auth_section() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "noauth.yaml",
        "database:\n  url: \"sqlite://database/orgadmin.db\"\n",
    );

    let output = run_orgadmin_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail without modules.auth");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("modules.auth"), "{stderr}");
}

#[test]
fn test_cli_mock_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // PostgreSQL DSN is replaced by in-memory SQLite under --mock.
    let body = format!("database:\n  url: \"postgresql://localhost/nonexistent\"\n{AUTH_SECTION}");
    let config_path = write_config(temp_dir.path(), "mock.yaml", &body);

    let output = run_orgadmin_server(&["--config", &config_path, "--mock", "--print-config"]);

    assert!(output.status.success(), "Print config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sqlite::memory:"), "{stdout}");
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "port.yaml", AUTH_SECTION);

    let output =
        run_orgadmin_server(&["--config", &config_path, "--port", "9123", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9123"), "{stdout}");
    assert!(stdout.contains("127.0.0.1:9123"), "{stdout}");
}

#[test]
fn test_cli_config_output_masks_secrets() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = r#"
database:
  url: "sqlite://database/orgadmin.db"

logging:
  default:
    console_level: info
    file: ""

modules:
  auth:
    jwt_secret: "TOP-SECRET-SIGNING-KEY-0123456789abcdef"
    bootstrap_admin:
      email: "admin@example.com"
      password: "hunter2-admin-pw"
"#;
    let config_path = write_config(temp_dir.path(), "secrets.yaml", body);

    for args in [
        vec!["--config", config_path.as_str(), "check"],
        vec!["--config", config_path.as_str(), "--print-config"],
    ] {
        let output = run_orgadmin_server(&args);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(output.status.success(), "{args:?}\nSTDOUT: {stdout}\nSTDERR: {stderr}");
        for secret in ["TOP-SECRET-SIGNING-KEY", "hunter2-admin-pw"] {
            assert!(!stdout.contains(secret), "{args:?} printed {secret}");
            assert!(!stderr.contains(secret), "{args:?} logged {secret}");
        }
        assert!(stdout.contains("admin@example.com"), "{stdout}");
    }
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!(
        r#"
logging:
  default:
    console_level: info
    file: ""
{AUTH_SECTION}    bootstrap_admin:
      email: "admin@example.com"
      password: "admin-password"
"#
    );
    let config_path = write_config(temp_dir.path(), "run.yaml", &body);

    let result = run_orgadmin_server_with_timeout(
        &["--config", &config_path, "--mock", "run"],
        Duration::from_secs(10),
    )
    .await;

    // Server should start and keep running until the timeout.
    match result {
        Err(err) => assert!(
            err.to_string().contains("elapsed"),
            "Server failed to start: {err}"
        ),
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("Server exited early\nSTDOUT: {stdout}\nSTDERR: {stderr}");
        }
    }
}

#[test]
fn test_cli_run_without_auth_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "run.yaml", "");

    let output = run_orgadmin_server(&["--config", &config_path, "--mock", "run"]);

    assert!(!output.status.success(), "Should fail without modules.auth");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("auth"), "{stderr}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_orgadmin_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_orgadmin_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}
