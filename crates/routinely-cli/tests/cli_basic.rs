//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_routinely"))
        .env("ROUTINELY_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_plan_manual_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &[
            "plan", "manual", "Study:60", "Break:15", "Workout:45:high",
            "--date", "2026-10-19", "--json",
        ],
    );
    assert_eq!(code, 0, "plan manual failed: {stderr}");

    let routine: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let segments = routine["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["start_minute"], 420);
    assert_eq!(segments[2]["end_minute"], 540);
    assert_eq!(segments[2]["priority"], "high");
}

#[test]
fn test_plan_reports_dropped_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "profile.wake_time", "21:00"]);
    assert_eq!(code, 0);

    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &["plan", "manual", "Movie:150", "Read:30", "--date", "2026-10-19", "--dry-run"],
    );
    assert_eq!(code, 0, "plan manual failed: {stderr}");
    assert!(stdout.contains("Dropped \"Movie\""));
    assert!(stdout.contains("21:00-21:30"));
}

#[test]
fn test_saved_routine_can_be_shown_and_completed() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["plan", "manual", "Study:60", "Workout:45", "--date", "2026-10-19"],
    );
    assert_eq!(code, 0, "plan manual failed: {stderr}");

    let (code, stdout, _) = run_cli(dir.path(), &["routine", "show", "--date", "2026-10-19"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("07:00-08:00"));
    assert!(stdout.contains("Workout"));

    let (code, stdout, _) = run_cli(
        dir.path(),
        &["routine", "complete", "1", "--date", "2026-10-19"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Completed: Study"));

    let (code, stdout, _) = run_cli(
        dir.path(),
        &["routine", "complete", "2", "--date", "2026-10-19"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Routine complete"));
}

#[test]
fn test_routine_show_without_plan_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["routine", "show", "--date", "2026-01-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no routine saved"));
}

#[test]
fn test_plan_auto_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &["plan", "auto", "--energy", "low", "--date", "2026-10-19", "--dry-run"],
    );
    assert_eq!(code, 0, "plan auto failed: {stderr}");
    assert!(stdout.contains("No goals available"));
}

#[test]
fn test_plan_text_without_endpoint_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["plan", "text", "study then gym"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_bad_task_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["plan", "manual", "Study"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "profile.sleep_time"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "23:00");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "scheduler.probe_minutes", "15"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "scheduler.probe_minutes"]);
    assert_eq!(stdout.trim(), "15");

    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_energy_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["energy", "set", "08:00=high", "13:00=low"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("2 point(s)"));

    let (code, stdout, _) = run_cli(dir.path(), &["energy", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("08:00"));
    assert!(stdout.contains("high"));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("routinely"));
}
