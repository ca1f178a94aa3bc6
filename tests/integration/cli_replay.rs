#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn pgraph() -> Command {
    Command::cargo_bin("pgraph").expect("pgraph binary")
}

fn write_script(body: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("script.toml");
    fs::write(&path, body).expect("write script");
    (dir, path)
}

const SCRIPT: &str = r#"
root = 10

[options]
out_capacity = 2
in_capacity = 1

[[op]]
kind = "insert"
node = 0
slot = 0
value = 20

[[op]]
kind = "edge"
from = 0
slot = 1
to = 1

[[op]]
kind = "write"
node = 1
value = 21

[[op]]
kind = "read"
node = 1
version = 1
"#;

#[test]
fn demo_prints_walkthrough() {
    let output = pgraph().arg("demo").output().expect("run demo");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("edge n0[1] -> n2"), "stdout: {stdout}");
    assert!(stdout.contains("read n1 @ v3 => 2"), "stdout: {stdout}");
    assert!(stdout.contains("read n1 @ v4 => 9"), "stdout: {stdout}");
}

#[test]
fn replay_records_failed_step_and_continues() {
    let (_dir, path) = write_script(SCRIPT);
    let output = pgraph()
        .args(["--format", "json", "replay"])
        .arg(&path)
        .output()
        .expect("run replay");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");

    let steps = report["steps"].as_array().expect("steps");
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["inserted"], 1);
    assert!(steps[1]["error"]
        .as_str()
        .expect("edge onto full node fails")
        .contains("back-references"));
    assert_eq!(steps[2]["version"], 2);
    assert_eq!(steps[3]["value"], 20);
    assert_eq!(report["stats"]["current_version"], 2);
    assert_eq!(report["nodes"][1]["current"], 21);
}

#[test]
fn strict_replay_fails_with_step_index() {
    let (_dir, path) = write_script(SCRIPT);
    let output = pgraph()
        .args(["replay", "--strict"])
        .arg(&path)
        .output()
        .expect("run replay");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("step 1 failed"), "stderr: {stderr}");
}

#[test]
fn malformed_script_is_reported() {
    let (_dir, path) = write_script("root = \"not a number\"\n");
    pgraph().arg("replay").arg(&path).assert().failure();
}
