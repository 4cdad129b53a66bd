//! Integration tests for custom patterns and the config file.

use std::io::Write;

use predicates::prelude::*;

use crate::{log_file, logscan};

#[test]
fn custom_pattern_from_cli() {
    let file = log_file("ts=2024-01-15T10:00:00 lvl=warn svc=billing msg=card declined\n");
    logscan()
        .arg("--color=never")
        .args(["-p", r"ts=(\S+) lvl=(\w+) svc=(\S+) msg=(.*)"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [WARN] [billing] card declined\n");
}

#[test]
fn custom_pattern_wins_over_builtin() {
    let file = log_file("2024-01-15 10:00:00 [INFO] [auth] user login\n");
    logscan()
        .arg("--color=never")
        .args(["-p", r"(\S+ \S+) \[(\w+)\] (.*)"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [INFO] [unknown] [auth] user login\n");
}

#[test]
fn invalid_custom_pattern_warns_and_continues() {
    let file = log_file("2024-01-15 10:00:00 [INFO] [auth] user login\n");
    logscan()
        .arg("--color=never")
        .args(["-p", "(unclosed"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("user login"))
        .stderr(predicate::str::contains("custom pattern rejected"));
}

#[test]
fn config_file_patterns_and_aliases() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        r#"
patterns = ['(\S+ \S+) <(\w+)> (.*)']

[levels]
"sev1" = "fatal"
"#
    )
    .unwrap();

    let file = log_file("2024-01-15 10:00:00 <SEV1> pager storm\n");
    logscan()
        .arg("--color=never")
        .arg("--config")
        .arg(config_file.path())
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [FATAL] [unknown] pager storm\n");
}

#[test]
fn config_file_level_overridden_by_cli() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(config_file, r#"level = "error""#).unwrap();

    let file = log_file(
        "2024-01-15 10:00:00 [INFO] [a] info msg\n2024-01-15 10:00:01 [ERROR] [a] error msg\n",
    );

    let output = logscan()
        .arg("--color=never")
        .arg("--config")
        .arg(config_file.path())
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error msg"));
    assert!(!stdout.contains("info msg"));

    let output = logscan()
        .arg("--color=never")
        .arg("--config")
        .arg(config_file.path())
        .arg("--level=info")
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("info msg"));
    assert!(!stdout.contains("error msg"));
}

#[test]
fn config_file_timestamp_format() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(config_file, r#"timestamp_format = "%H:%M:%S%.3f""#).unwrap();

    let file = log_file("2024-01-15 10:00:00,042 [INFO] [a] hi\n");
    logscan()
        .arg("--color=never")
        .arg("--config")
        .arg(config_file.path())
        .arg(file.path())
        .assert()
        .success()
        .stdout("[10:00:00.042] [INFO] [a] hi\n");
}

#[test]
fn malformed_config_file_exits_one() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(config_file, "this is = = not toml").unwrap();
    let file = log_file("");
    logscan()
        .arg("--config")
        .arg(config_file.path())
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}
