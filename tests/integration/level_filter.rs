//! Integration tests for level, text, time and recent filtering.

use crate::{log_file, logscan};

const SAMPLE: &str = "\
2024-01-15 09:00:00 [DEBUG] [cache] debug msg
2024-01-15 09:01:00 [INFO] [auth] info msg
2024-01-15 09:02:00 [WARN] [disk] warn msg
2024-01-15 09:03:00 [ERROR] [db] error msg
2024-01-15 09:04:00 [FATAL] [kernel] fatal msg
";

fn run(args: &[&str]) -> String {
    let file = log_file(SAMPLE);
    let output = logscan()
        .arg("--color=never")
        .args(args)
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn level_is_exact_match() {
    let stdout = run(&["--level=warn"]);
    assert!(stdout.contains("warn msg"));
    assert!(!stdout.contains("error msg"), "exact filter, not at-or-above");
    assert!(!stdout.contains("info msg"));
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn min_level_keeps_more_severe() {
    let stdout = run(&["--min-level=warn"]);
    assert!(!stdout.contains("debug msg"));
    assert!(!stdout.contains("info msg"));
    assert!(stdout.contains("warn msg"));
    assert!(stdout.contains("error msg"));
    assert!(stdout.contains("fatal msg"));
}

#[test]
fn no_level_flag_shows_all() {
    assert_eq!(run(&[]).lines().count(), 5);
}

#[test]
fn invalid_level_rejected() {
    let file = log_file(SAMPLE);
    logscan()
        .arg("--level=loud")
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn search_is_case_sensitive_on_message() {
    assert_eq!(run(&["--search", "error msg"]).lines().count(), 1);
    assert_eq!(run(&["--search", "ERROR msg"]).lines().count(), 0);
    // source labels are not searched
    assert_eq!(run(&["--search", "kernel"]).lines().count(), 0);
}

#[test]
fn time_range_is_inclusive() {
    let stdout = run(&["--since", "2024-01-15 09:01:00", "--until", "2024-01-15T09:03:00"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("info msg"));
    assert!(lines[2].contains("error msg"));
}

#[test]
fn unparsable_since_is_config_error() {
    let file = log_file(SAMPLE);
    logscan()
        .arg("--since=tomorrow")
        .arg(file.path())
        .assert()
        .code(1);
}

#[test]
fn recent_takes_last_records() {
    let stdout = run(&["--recent", "2"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("error msg"));
    assert!(lines[1].contains("fatal msg"));
}

#[test]
fn recent_zero_is_empty_and_large_is_everything() {
    assert_eq!(run(&["--recent", "0"]), "");
    assert_eq!(run(&["--recent", "100"]).lines().count(), 5);
}

#[test]
fn recent_applies_after_level_filter() {
    let stdout = run(&["--min-level=info", "--recent", "1"]);
    assert!(stdout.contains("fatal msg"));
    assert_eq!(stdout.lines().count(), 1);
}
