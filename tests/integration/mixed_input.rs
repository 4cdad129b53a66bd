//! Integration tests for files mixing formats, noise and blank lines.

use predicates::prelude::*;

use crate::{log_file, logscan};

const MIXED: &str = "\
2024-01-15 10:00:00 [INFO] [auth] bracketed
Jan 15 10:00:01 WARN sshd: syslog style

2024-01-15 10:00:02,500 [ERROR] [db] millis
2024-01-15 10:00:03 DEBUG: simple
not a log line at all
2024-01-15T10:00:04.750Z [FATAL] [api] iso
    at com.example.Main(Main.java:42)
";

#[test]
fn every_builtin_format_is_recognized() {
    let file = log_file(MIXED);
    let output = logscan()
        .arg("--color=never")
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    for message in ["bracketed", "syslog style", "millis", "simple", "iso"] {
        assert!(stdout.contains(message), "missing {message}");
    }
    assert!(!stdout.contains("not a log line"));
    assert!(!stdout.contains("Main.java"));
    assert!(stdout.contains("[WARN] [sshd] syslog style"));
    assert!(stdout.contains("[DEBUG] [unknown] simple"));
}

#[test]
fn stats_report_blank_and_unparsable_separately() {
    let file = log_file(MIXED);
    logscan()
        .arg("--color=never")
        .arg("--stats")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "lines: 8 total, 5 parsed, 2 unparsable, 1 blank (62.5% parsed)",
        ))
        .stderr(predicate::str::contains("FATAL: 1"));
}

#[test]
fn crlf_line_endings_are_stripped() {
    let file = log_file("2024-01-15 10:00:00 [INFO] [auth] windows\r\n");
    logscan()
        .arg("--color=never")
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [INFO] [auth] windows\n");
}

#[test]
fn strict_timestamps_drop_unrecognized_times() {
    let file = log_file("yesterday INFO svc: started\n2024-01-15 10:00:00 INFO svc: ok\n");
    let pattern = r"(\S+) (\w+) (\w+): (.*)";

    let permissive = logscan()
        .arg("--color=never")
        .arg("--stats")
        .args(["--pattern", pattern])
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&permissive.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(String::from_utf8_lossy(&permissive.stderr).contains("fallback timestamps: 1"));

    logscan()
        .arg("--color=never")
        .arg("--strict-timestamps")
        .args(["--pattern", pattern])
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [INFO] [svc] ok\n");
}
