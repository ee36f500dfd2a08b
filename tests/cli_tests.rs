use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

const LOG_LINES: &[&str] = &[
    r#"192.168.1.1 - user1 [15/Oct/2023:10:00:00 +0000] "GET /api/data HTTP/1.1" 200 512 "-" "Mozilla/5.0""#,
    r#"192.168.1.2 - user2 [16/Oct/2023:10:00:00 +0000] "POST /api/data HTTP/1.1" 404 0 "-" "curl/8.0""#,
    r#"192.168.1.2 - user3 [17/Oct/2023:10:00:00 +0000] "GET /api/data HTTP/1.1" 200 1024 "-" "Mozilla/5.0""#,
    r#"192.168.1.1 - user1 [18/Oct/2023:10:00:00 +0000] "DELETE /api/otherdata HTTP/1.1" 200 0 "-" "Mozilla/5.0""#,
    r#"192.168.1.1 - user2 [19/Oct/2023:10:00:00 +0000] "GET /api/otherdata HTTP/1.1" 404 0 "-" "curl/8.0""#,
];

fn create_log_file() -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    for line in LOG_LINES {
        writeln!(temp_file, "{}", line).unwrap();
    }
    temp_file
}

#[test]
fn test_markdown_report_is_saved() {
    let log_file = create_log_file();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .current_dir(out_dir.path())
        .arg("--path")
        .arg(log_file.path())
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Cut 5 requests into analyze.md"));

    let report = fs::read_to_string(out_dir.path().join("analyze.md")).unwrap();
    assert!(report.contains("## General information"));
    assert!(report.contains("| Number of requests              | 5                         |"));
    assert!(report.contains("| Average response size           | 307b                      |"));
    assert!(report.contains("| 95p response size               | 512b                      |"));
    assert!(report.contains("| Average time between requests   | 24h 0m 0s                 |"));
    assert!(report.contains("| 192.168.1.1           | 3                         |"));
}

#[test]
fn test_adoc_with_custom_output_and_print() {
    let log_file = create_log_file();
    let out_dir = tempdir().unwrap();
    let output = out_dir.path().join("weekly");

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .arg("--path")
        .arg(log_file.path())
        .arg("--format")
        .arg("adoc")
        .arg("--output")
        .arg(&output)
        .arg("--print")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("== General information"))
        .stdout(predicate::str::contains("| 200 | OK | 3"));

    assert!(out_dir.path().join("weekly.adoc").exists());
}

#[test]
fn test_status_filter() {
    let log_file = create_log_file();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .current_dir(out_dir.path())
        .arg("--path")
        .arg(log_file.path())
        .arg("--filter-field")
        .arg("status")
        .arg("--filter-value")
        .arg("404")
        .arg("--format")
        .arg("json")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Filtering by status: 404"))
        .stdout(predicate::str::contains("Cut 2 requests"));

    let json = fs::read_to_string(out_dir.path().join("analyze.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_requests"], 2);
    assert_eq!(value["response_codes"][0]["code"], 404);
}

#[test]
fn test_time_window() {
    let log_file = create_log_file();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .current_dir(out_dir.path())
        .arg("--path")
        .arg(log_file.path())
        .arg("--from")
        .arg("2023-10-16")
        .arg("--to")
        .arg("2023-10-18")
        .assert();

    assert.success().stdout(predicate::str::contains("Cut 2 requests"));

    let report = fs::read_to_string(out_dir.path().join("analyze.md")).unwrap();
    assert!(report.contains("| Start date                      | 16.10.2023                |"));
    assert!(report.contains("| End date                        | 18.10.2023                |"));
}

#[test]
fn test_filter_removing_everything_fails() {
    let log_file = create_log_file();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .current_dir(out_dir.path())
        .arg("--path")
        .arg(log_file.path())
        .arg("--filter-field")
        .arg("method")
        .arg("--filter-value")
        .arg("PATCH")
        .assert();

    assert
        .failure()
        .stderr(predicate::str::contains("no records to analyze"));
    assert!(!out_dir.path().join("analyze.md").exists());
}

#[test]
fn test_malformed_log_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", LOG_LINES[0]).unwrap();
    writeln!(temp_file, "This is not an access log line").unwrap();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .current_dir(out_dir.path())
        .arg("--path")
        .arg(temp_file.path())
        .assert();

    assert.failure().stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_empty_file_fails() {
    let temp_file = NamedTempFile::new().unwrap();
    let out_dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    cmd.current_dir(out_dir.path())
        .arg("--path")
        .arg(temp_file.path())
        .assert()
        .failure();
}

#[test]
fn test_nonexistent_path() {
    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd.arg("--path").arg("nonexistent_file_*.log").assert();

    assert
        .failure()
        .stderr(predicate::str::contains("neither an existing local path nor a URL"));
}

#[test]
fn test_filter_value_requires_field() {
    let log_file = create_log_file();

    let mut cmd = Command::cargo_bin("sawmill").unwrap();
    let assert = cmd
        .arg("--path")
        .arg(log_file.path())
        .arg("--filter-value")
        .arg("404")
        .assert();

    assert
        .failure()
        .stderr(predicate::str::contains("--filter-value requires --filter-field"));
}
