//! End-to-end tests for the run-idioms binary.

use assert_cmd::Command;
use predicates::str::{contains, is_match};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("run-idioms").unwrap();
    cmd.env_remove("VERSION").env_remove("IDIOMS_CONFIG");
    cmd
}

/// Two idioms with masters and stored fresh outputs that differ only in
/// identifiers and timestamps.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let xml = dir.path().join("data/idioms-xml");
    let masters = dir.path().join("data/idioms-json-2.1");
    let stored = dir.path().join("out");
    for d in [&xml, &masters, &stored] {
        fs::create_dir_all(d).unwrap();
    }

    for (id, name) in [("campaign", "Operation Alpha"), ("indicator", "Bad IP")] {
        fs::write(xml.join(format!("{id}.xml")), "<stix:STIX_Package/>").unwrap();
        fs::write(
            masters.join(format!("{id}.json")),
            format!(
                r#"{{"type": "bundle", "id": "bundle--m-{id}", "objects": [{{"type": "{id}", "id": "{id}--1", "created": "2017-01-01T00:00:00Z", "name": "{name}"}}]}}"#
            ),
        )
        .unwrap();
        write_stored(&stored, id, name);
    }
    dir
}

fn write_stored(stored: &Path, id: &str, name: &str) {
    fs::write(
        stored.join(format!("{id}.json")),
        format!(
            r#"{{"type": "bundle", "id": "bundle--f-{id}", "objects": [{{"type": "{id}", "id": "{id}--2", "created": "2024-05-05T00:00:00Z", "name": "{name}"}}]}}"#
        ),
    )
    .unwrap();
}

#[test]
fn stored_outputs_pass() {
    let dir = workspace();
    cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--stored", "out", "--spec-version", "2.1", "--no-color"])
        .assert()
        .success()
        .stdout(contains("2 total, 2 passed, 0 failed"));
}

#[test]
fn changed_value_fails_with_status_one() {
    let dir = workspace();
    write_stored(&dir.path().join("out"), "indicator", "Good IP");
    cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--stored", "out", "--spec-version", "2.1", "--no-color"])
        .assert()
        .code(1)
        .stdout(contains("1 failed"))
        .stdout(contains("objects[0].name"));
}

#[test]
fn json_summary() {
    let dir = workspace();
    let output = cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--stored", "out", "--spec-version", "2.1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["passed"], 2);
    assert_eq!(summary["results"][0]["id"], "campaign");
    assert_eq!(summary["results"][0]["pairs"], 3);
}

#[test]
fn version_from_environment() {
    let dir = workspace();
    cmd()
        .current_dir(dir.path())
        .env("VERSION", "2.0")
        .args(["--base-dir", "data", "--stored", "out"])
        .assert()
        .code(2)
        .stderr(contains("idioms-json-2.0"));
}

#[test]
fn filter_selects_cases() {
    let dir = workspace();
    cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--stored", "out", "--spec-version", "2.1", "--filter", "camp", "--no-color"])
        .assert()
        .success()
        .stdout(contains("1 total, 1 passed"));
}

#[test]
fn config_file_supplies_settings() {
    let dir = workspace();
    fs::write(
        dir.path().join("idioms.toml"),
        "spec_version = \"2.1\"\nbase_dir = \"data\"\nstored_outputs = \"out\"\n",
    )
    .unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["--config", "idioms.toml", "--no-color"])
        .assert()
        .success()
        .stdout(contains("2 passed"));
}

#[test]
fn missing_converter_is_a_setup_error() {
    let dir = workspace();
    cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--spec-version", "2.1"])
        .assert()
        .code(2)
        .stderr(contains("no converter configured"));
}

#[test]
fn converter_and_stored_conflict() {
    cmd()
        .args(["--converter", "elevate", "--stored", "out"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn force_color_keeps_level_and_case_on_result_lines() {
    let dir = workspace();
    cmd()
        .current_dir(dir.path())
        .args(["--base-dir", "data", "--stored", "out", "--spec-version", "2.1", "--force-color"])
        .assert()
        .success()
        .stdout(contains("\x1b["))
        .stdout(is_match(r"\[INFO\].* indicator .*Result: PASS").unwrap());
}

#[test]
fn force_color_and_no_color_conflict() {
    cmd()
        .args(["--stored", "out", "--force-color", "--no-color"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}
