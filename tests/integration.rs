// Integration tests for the maturity CLI.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes, stdout/stderr output, and side effects.
//
// Prerequisites: tempfile, assert_cmd, predicates (dev-dependencies).

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to build a Command for the maturity binary.
fn maturity() -> Command {
    Command::cargo_bin("maturity").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    maturity()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("maturity"));
}

#[test]
fn cli_help_flag() {
    maturity()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asset management maturity survey"));
}

#[test]
fn scores_requires_company() {
    maturity()
        .arg("scores")
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn missing_workspace_is_runtime_failure() {
    maturity()
        .arg("companies")
        .arg("/nonexistent/path/that/does/not/exist")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn topics_seeds_catalog_and_lists_forty_topics() {
    let workspace = TempDir::new().expect("temp dir should be created");

    let output = maturity()
        .arg("topics")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("01 Purpose & Context"))
        .stdout(predicate::str::contains("40 Outcomes & Impacts"))
        .get_output()
        .stdout
        .clone();

    let listing = String::from_utf8(output).expect("stdout should be utf-8");
    assert_eq!(listing.lines().count(), 40);
    assert!(workspace.path().join("topics.json").is_file());
}

#[test]
fn topics_template_lists_scales() {
    let workspace = TempDir::new().expect("temp dir should be created");

    maturity()
        .arg("topics")
        .arg(workspace.path())
        .arg("--template")
        .assert()
        .success()
        .stdout(predicate::str::contains("# relevance:"))
        .stdout(predicate::str::contains("[[answers]]"))
        .stdout(predicate::str::contains("topic = 40"));
}

#[test]
fn short_catalog_exits_with_warning() {
    let workspace = TempDir::new().expect("temp dir should be created");
    fs::write(
        workspace.path().join("topics.json"),
        r#"[{"id": 1, "name": "Only topic", "desc": ""}]"#,
    )
    .expect("catalog should write");

    maturity()
        .arg("topics")
        .arg(workspace.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("01 Only topic"))
        .stderr(predicate::str::contains("exactly 40 topics"));
}

#[test]
fn companies_on_empty_workspace() {
    let workspace = TempDir::new().expect("temp dir should be created");

    maturity()
        .arg("companies")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no responses recorded yet"));
}

#[test]
fn config_overrides_data_dir() {
    let workspace = TempDir::new().expect("temp dir should be created");
    fs::write(
        workspace.path().join("survey.toml"),
        "[storage]\ndata_dir = \"ledger\"\n",
    )
    .expect("config should write");

    maturity()
        .arg("companies")
        .arg(workspace.path())
        .assert()
        .success();

    assert!(workspace.path().join("ledger").is_dir());
    assert!(!workspace.path().join("data").exists());
}

#[test]
fn invalid_config_is_runtime_failure() {
    let workspace = TempDir::new().expect("temp dir should be created");
    fs::write(
        workspace.path().join("survey.toml"),
        "[scoring]\ntarget = 150.0\n",
    )
    .expect("config should write");

    maturity()
        .arg("companies")
        .arg(workspace.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("target"));
}
