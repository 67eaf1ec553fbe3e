//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway HOME so
//! they never touch a real data directory.

use std::process::Command;
use std::sync::OnceLock;

use tempfile::TempDir;

fn test_home() -> &'static TempDir {
    static HOME: OnceLock<TempDir> = OnceLock::new();
    HOME.get_or_init(|| TempDir::new().expect("Failed to create test home"))
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusgate-cli", "--"])
        .args(args)
        .env("HOME", test_home().path())
        .env("FOCUSGATE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("isRunning").is_some());
    assert!(parsed.get("timeLeft").is_some());
}

#[test]
fn test_timer_start_and_stop() {
    let (stdout, _, code) = run_cli(&["timer", "start", "--work", "25", "--break", "5"]);
    assert_eq!(code, 0, "Timer start failed");
    assert!(stdout.contains("Timer started"));

    let (stdout, _, code) = run_cli(&["timer", "stop"]);
    assert_eq!(code, 0, "Timer stop failed");
    assert!(stdout.contains("Timer stopped"));
}

#[test]
fn test_timer_start_rejects_zero_duration() {
    let (_, _, code) = run_cli(&["timer", "start", "--work", "0"]);
    assert_ne!(code, 0, "Zero work duration should be rejected");
}

#[test]
fn test_sites_add_list_remove() {
    let (_, _, code) = run_cli(&["sites", "add", "social.example"]);
    assert_eq!(code, 0, "Sites add failed");

    let (stdout, _, code) = run_cli(&["sites", "list"]);
    assert_eq!(code, 0, "Sites list failed");
    assert!(stdout.contains("social.example"));

    let (_, _, code) = run_cli(&["sites", "remove", "social.example"]);
    assert_eq!(code, 0, "Sites remove failed");
}

#[test]
fn test_sites_add_rejects_invalid_domain() {
    let (_, stderr, code) = run_cli(&["sites", "add", "not a domain!"]);
    assert_ne!(code, 0, "Invalid domain should be rejected");
    assert!(stderr.contains("error"));
}

#[test]
fn test_sites_check_without_running_timer() {
    // Matching is reported even while stopped; blocking is a timer concern.
    let (_, _, code) = run_cli(&["sites", "add", "video.example"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&["sites", "check", "https://www.video.example/feed"]);
    assert_eq!(code, 0, "Sites check failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["blocked"], serde_json::json!(true));

    let (_, _, code) = run_cli(&["sites", "remove", "video.example"]);
    assert_eq!(code, 0);
}

#[test]
fn test_sites_recheck() {
    let (stdout, _, code) = run_cli(&["sites", "recheck"]);
    assert_eq!(code, 0, "Sites recheck failed");
    assert!(stdout.contains("blockedCount"));
}

#[test]
fn test_stats_show() {
    let (stdout, _, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "Stats show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("daily").is_some());
    assert!(parsed.get("weekly").is_some());
}

#[test]
fn test_stats_cleanup() {
    let (_, _, code) = run_cli(&["stats", "cleanup"]);
    assert_eq!(code, 0, "Stats cleanup failed");
}

#[test]
fn test_stats_all() {
    let (stdout, _, code) = run_cli(&["stats", "all"]);
    assert_eq!(code, 0, "Stats all failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("sessions").is_some());
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key() {
    let (_, _, code) = run_cli(&["config", "get", "timer.no_such_key"]);
    assert_ne!(code, 0, "Unknown key should fail");
}

#[test]
fn test_config_set() {
    let (_, _, code) = run_cli(&["config", "set", "notifications.enabled", "true"]);
    assert_eq!(code, 0, "Config set failed");
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("[timer]"));
}
