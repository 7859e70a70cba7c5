//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_fasting-cli"))
        .args(args)
        .env("FASTING_DATA_DIR", data_dir.path())
        .env_remove("FASTING_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_fast_lifecycle() {
    let dir = TempDir::new().unwrap();

    let started = run_json(
        &dir,
        &["fast", "start", "--hours", "16", "--start", "2026-10-01T20:00:00Z"],
    );
    assert_eq!(started["status"], "active");
    assert_eq!(started["target_interval"], 57_600);

    let status = run_json(&dir, &["fast", "status"]);
    assert_eq!(status["fast"]["id"], started["id"]);

    let ended = run_json(&dir, &["fast", "end", "--at", "2026-10-02T12:00:00Z"]);
    assert_eq!(ended["status"], "completed");
    assert_eq!(ended["end_date"], "2026-10-02T12:00:00Z");

    let (_, stderr, code) = run_cli(&dir, &["fast", "end"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no active fast"));

    let history = run_json(&dir, &["history", "list"]);
    assert_eq!(history.as_array().unwrap().len(), 1);

    let stats = run_json(&dir, &["history", "stats"]);
    assert_eq!(stats["total_fasts"], 1);
    assert_eq!(stats["goals_met"], 1);
}

#[test]
fn test_second_active_fast_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["fast", "start"]);
    let (_, stderr, code) = run_cli(&dir, &["fast", "start"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("still active"), "stderr: {stderr}");
}

#[test]
fn test_historical_fast_and_delete() {
    let dir = TempDir::new().unwrap();
    let fast = run_json(
        &dir,
        &[
            "fast",
            "start",
            "--start",
            "2026-09-01T20:00:00Z",
            "--end",
            "2026-09-02T10:00:00Z",
        ],
    );
    let groups = run_json(&dir, &["history", "groups"]);
    assert_eq!(groups[0]["title"], "September 2026");

    let id = fast["id"].to_string();
    let (stdout, _, code) = run_cli(&dir, &["fast", "delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("deleted"));

    let history = run_json(&dir, &["history", "list"]);
    assert!(history.as_array().unwrap().is_empty());
}

#[test]
fn test_mood() {
    let dir = TempDir::new().unwrap();
    let fast = run_json(&dir, &["fast", "start"]);
    let id = fast["id"].to_string();
    let updated = run_json(&dir, &["fast", "mood", &id, "5"]);
    assert_eq!(updated["mood"], 5);

    let (_, _, code) = run_cli(&dir, &["fast", "mood", &id, "9"]);
    assert_eq!(code, 1);
}

#[test]
fn test_widget_schedule_from_snapshot() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &["fast", "start", "--hours", "8", "--start", "2026-10-01T08:00:00Z"],
    );

    let snapshot = run_json(&dir, &["widget", "snapshot"]);
    assert_eq!(snapshot["state"], "active");

    let schedule = run_json(&dir, &["widget", "schedule", "--now", "2026-10-01T10:00:00Z"]);
    let entries = schedule.as_array().unwrap();
    assert_eq!(entries.len(), 77);
    assert_eq!(entries[0]["date"], "2026-10-01T10:00:00Z");
    assert_eq!(entries[1]["date"], "2026-10-01T10:04:48Z");
}

#[test]
fn test_widget_schedule_without_snapshot_is_idle() {
    let dir = TempDir::new().unwrap();
    let schedule = run_json(&dir, &["widget", "schedule"]);
    let entries = schedule.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["data"]["state"], "idle");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "fast.default_target_hours"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "16");

    let (_, _, code) = run_cli(&dir, &["config", "set", "fast.default_target_hours", "18"]);
    assert_eq!(code, 0);

    let fast = run_json(&dir, &["fast", "start"]);
    assert_eq!(fast["target_interval"], 18 * 3600);

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "fast.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_clear_history_limit() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["config", "set", "history.limit", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "history.limit"]);
    assert_eq!(stdout.trim(), "5");

    let (_, stderr, code) = run_cli(&dir, &["config", "set", "history.limit", "none"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "history.limit"]);
    assert_eq!(stdout.trim(), "null");
}
