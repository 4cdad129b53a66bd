//! Integration tests for reading and merging log files.

use predicates::prelude::*;

use crate::{log_file, logscan};

#[test]
fn single_file_outputs_rendered_records() {
    let file = log_file("2024-01-15 10:00:00 [INFO] [auth] user login\n");
    logscan()
        .arg("--color=never")
        .arg(file.path())
        .assert()
        .success()
        .stdout("[2024-01-15 10:00:00] [INFO] [auth] user login\n");
}

#[test]
fn files_are_merged_in_timestamp_order() {
    let a = log_file("2024-01-15 10:00:00 [INFO] [auth] user login\n");
    let b = log_file("2024-01-15 09:59:59 [ERROR] [db] connection lost\n");
    let output = logscan()
        .arg("--color=never")
        .arg(a.path())
        .arg(b.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "[2024-01-15 09:59:59] [ERROR] [db] connection lost",
            "[2024-01-15 10:00:00] [INFO] [auth] user login",
        ]
    );
}

#[test]
fn parallel_output_matches_sequential() {
    let a = log_file(
        "2024-01-15 10:00:00 [INFO] [a] a1\n2024-01-15 10:00:02 [WARN] [a] a2\n",
    );
    let b = log_file("2024-01-15 10:00:01 [INFO] [b] b1\n2024-01-15 10:00:00 ERROR: b0\n");

    let sequential = logscan()
        .arg("--color=never")
        .arg(a.path())
        .arg(b.path())
        .output()
        .unwrap();
    let parallel = logscan()
        .arg("--color=never")
        .arg("--parallel")
        .arg(a.path())
        .arg(b.path())
        .output()
        .unwrap();
    assert!(parallel.status.success());
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn missing_file_is_reported_and_others_still_parsed() {
    let file = log_file("2024-01-15 10:00:00 [INFO] [auth] user login\n");
    logscan()
        .arg("--color=never")
        .arg("/nonexistent/logscan/missing.log")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("user login"))
        .stderr(predicate::str::contains("skipping file"))
        .stderr(predicate::str::contains("/nonexistent/logscan/missing.log"));
}

#[test]
fn all_files_missing_exits_two() {
    logscan()
        .arg("/nonexistent/logscan/one.log")
        .arg("/nonexistent/logscan/two.log")
        .assert()
        .code(2)
        .stdout("");
}

#[test]
fn empty_file_produces_no_output() {
    let file = log_file("");
    logscan().arg(file.path()).assert().success().stdout("");
}

#[test]
fn no_files_is_usage_error() {
    logscan().assert().failure();
}

#[test]
fn json_output_one_object_per_record() {
    let file = log_file(
        "2024-01-15 10:00:00 [INFO] [auth] user login\n2024-01-15 10:00:01 WARN: low disk\n",
    );
    let output = logscan().arg("--json").arg(file.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["source"], "auth");
    assert_eq!(values[1]["level"], "WARN");
    assert_eq!(values[1]["source"], "unknown");
    assert_eq!(values[1]["message"], "low disk");
}

#[test]
fn completions_print_script() {
    logscan()
        .arg("--completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("logscan"));
}
