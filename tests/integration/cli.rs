//! CLI binary tests
//!
//! Each test points --data-dir at a temp directory so config and logs
//! never touch the real home directory.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::{LEGACY_DOCUMENT, SAMPLE_DOCUMENT};

fn storyboard_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("storyboard").expect("binary builds");
    cmd.arg("--data-dir").arg(data_dir.path().join("data"));
    cmd
}

#[test]
fn inspect_prints_step_count_and_keys() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("board.json");
    fs::write(&doc, &*SAMPLE_DOCUMENT).unwrap();

    storyboard_cmd(&dir)
        .arg("inspect")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 steps"))
        .stdout(predicate::str::contains("step-setup"))
        .stdout(predicate::str::contains("Open the connection pool"));
}

#[test]
fn inspect_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("broken.json");
    fs::write(&doc, "{not json").unwrap();

    storyboard_cmd(&dir)
        .arg("inspect")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn inspect_rejects_missing_steps_field() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("other.json");
    fs::write(&doc, r#"{"other": []}"#).unwrap();

    storyboard_cmd(&dir).arg("inspect").arg(&doc).assert().failure();
}

#[test]
fn convert_writes_a_stamped_canonical_document() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("legacy.json");
    fs::write(&doc, &*LEGACY_DOCUMENT).unwrap();
    let out = dir.path().join("out");

    storyboard_cmd(&dir)
        .arg("convert")
        .arg(&doc)
        .arg("--out")
        .arg(&out)
        .arg("--basename")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let entries: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name();
    let name = name.to_string_lossy();
    assert!(name.starts_with("demo_"));
    assert!(name.ends_with(".json"));

    // the converted document is canonical: the legacy value moved into
    // the description and the numeric snapshot tag became dbType
    let contents = fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert!(contents.contains("notes from the first draft"));
    assert!(contents.contains("\"dbType\": \"nosql\""));
}

#[test]
fn apply_templates_replaces_target_step_snapshots() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("board.json");
    fs::write(&doc, &*SAMPLE_DOCUMENT).unwrap();
    let templates = dir.path().join("templates.json");
    fs::write(
        &templates,
        r#"{"dbTemplates": [{"dbType": "nosql", "table_name": "sessions", "data": {}}]}"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    storyboard_cmd(&dir)
        .arg("apply-templates")
        .arg(&doc)
        .arg("--step")
        .arg("0")
        .arg("--templates")
        .arg(&templates)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let contents = fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert!(contents.contains("sessions"));
    assert!(!contents.contains("\"users\""));
}

#[test]
fn apply_templates_fails_on_out_of_range_step() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("board.json");
    fs::write(&doc, &*SAMPLE_DOCUMENT).unwrap();
    let templates = dir.path().join("templates.json");
    fs::write(&templates, r#"{"dbTemplates": []}"#).unwrap();

    storyboard_cmd(&dir)
        .arg("apply-templates")
        .arg(&doc)
        .arg("--step")
        .arg("9")
        .arg("--templates")
        .arg(&templates)
        .assert()
        .failure();
}
