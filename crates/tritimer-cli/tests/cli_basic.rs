//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All tests
//! run against the dev config directory (TRITIMER_ENV=dev) so they never
//! touch a real user configuration.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tritimer-cli", "--"])
        .args(args)
        .env("TRITIMER_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_countdown_one_second_completes() {
    let (stdout, _, code) = run_cli(&["countdown", "1", "--json"]);
    assert_eq!(code, 0, "countdown failed");
    assert!(stdout.contains("\"type\":\"started\""), "missing started event");
    assert!(stdout.contains("\"type\":\"completed\""), "missing completed event");
}

#[test]
fn test_countdown_zero_preset_is_rejected() {
    let (_, stderr, code) = run_cli(&["countdown", "--preset", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "expected error on stderr: {stderr}");
}

#[test]
fn test_hiit_zero_rounds_is_rejected() {
    let (_, stderr, code) = run_cli(&["hiit", "--work", "20", "--rounds", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("rounds"), "expected rounds error: {stderr}");
}

#[test]
fn test_hiit_zero_rest_emits_no_rest_phase() {
    let (stdout, _, code) = run_cli(&[
        "hiit", "--work", "1", "--rest", "0", "--rounds", "2", "--json",
    ]);
    assert_eq!(code, 0, "hiit run failed");
    assert!(!stdout.contains("\"kind\":\"rest\""), "rest phase leaked: {stdout}");
    assert!(stdout.contains("\"type\":\"completed\""));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list is not valid JSON");
    assert!(parsed.get("interval").is_some());
}

#[test]
fn test_config_set_then_get() {
    // Timer runs in other tests rewrite their own mode sections, so use a
    // key no session run ever touches.
    let (_, _, code) = run_cli(&["config", "set", "interval.rounds", "6"]);
    assert_eq!(code, 0, "config set failed");
    let (stdout, _, code) = run_cli(&["config", "get", "interval.rounds"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "6");
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}
