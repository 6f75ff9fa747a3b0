//! Black-box tests of the docbot binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docbot() -> Command {
    Command::cargo_bin("docbot").unwrap()
}

#[test]
fn help_lists_the_pipeline_subcommands() {
    docbot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("record"))
        .stdout(predicate::str::contains("narrate"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("video"));
}

#[test]
fn record_rejects_a_missing_project_directory() {
    docbot()
        .args(["record", "/nonexistent/docbot-project"])
        .assert()
        .failure();
}

#[test]
fn run_rejects_malformed_instructions() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("commands_1.yaml");
    std::fs::write(&file, "commands: []\nexpect: []\n").unwrap();

    docbot()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("commands"));
}

#[test]
fn record_on_a_project_without_scenes_succeeds_with_nothing_to_do() {
    let tmp = TempDir::new().unwrap();
    docbot()
        .arg("record")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 clip(s)"));
}
