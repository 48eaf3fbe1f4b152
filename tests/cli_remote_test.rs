//! CLI tests for `check` and `fix` that stop before any remote call

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const REMOTE_VARS: &[&str] = &[
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_EVENT_PATH",
    "GITHUB_ACTOR",
    "GITHUB_API_URL",
];

fn fenceguard() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fenceguard"));
    cmd.current_dir(std::env::temp_dir()).env("NO_COLOR", "1");
    for var in REMOTE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_check_without_token_fails() {
    fenceguard()
        .arg("check")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_EVENT_PATH", "/nonexistent/event.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required input GITHUB_TOKEN"));
}

#[test]
fn test_fix_without_repository_fails() {
    fenceguard()
        .arg("fix")
        .env("GITHUB_TOKEN", "t")
        .env("GITHUB_EVENT_PATH", "/nonexistent/event.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_REPOSITORY"));
}

#[test]
fn test_check_rejects_malformed_repository() {
    fenceguard()
        .args(["check", "--token", "t", "--repository", "widgets"])
        .args(["--event-path", "/nonexistent/event.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn test_check_with_unreadable_event_fails() {
    let dir = tempdir().unwrap();

    fenceguard()
        .arg("check")
        .env("GITHUB_TOKEN", "t")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_EVENT_PATH", dir.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read event payload"));
}

#[test]
fn test_check_with_malformed_event_fails() {
    let dir = tempdir().unwrap();
    let event = dir.path().join("event.json");
    fs::write(&event, r#"{"issue":{"body":"no number"}}"#).unwrap();

    fenceguard()
        .arg("check")
        .env("GITHUB_TOKEN", "t")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_EVENT_PATH", &event)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("issue.number"));
}

#[test]
fn test_token_value_is_hidden_from_help() {
    fenceguard()
        .args(["check", "--help"])
        .env("GITHUB_TOKEN", "super-secret-value")
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_TOKEN"))
        .stdout(predicate::str::contains("super-secret-value").not());
}

#[test]
fn test_api_url_from_environment_is_used() {
    let dir = tempdir().unwrap();
    let event = dir.path().join("event.json");
    fs::write(&event, r#"{"issue":{"number":1,"body":"clean"}}"#).unwrap();

    // Nothing listens on the discard port, so the first remote call fails
    fenceguard()
        .arg("check")
        .env("GITHUB_TOKEN", "t")
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_EVENT_PATH", &event)
        .env("GITHUB_ACTOR", "")
        .env("GITHUB_API_URL", "http://127.0.0.1:9")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to list comments on issue #1"))
        .stderr(predicate::str::contains("request did not complete"));
}
