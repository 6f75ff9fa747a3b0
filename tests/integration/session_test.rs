//! End-to-end pty session against a real shell script.
//!
//! Uses a small command-loop script instead of an interactive bash so the
//! prompt text is under the test's control and independent of the host's
//! shell configuration.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

use docbot::cancel::CancelToken;
use docbot::config::SessionConfig;
use docbot::session::{CaptureSink, Expect, Instructions, MemorySink, TerminalSession};

const SHELL_SCRIPT: &str = r#"#!/bin/sh
printf 'ready> '
while IFS= read -r line; do
  eval "$line"
  printf 'ready> '
done
"#;

fn fake_shell(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("loop.sh");
    fs::write(&path, SHELL_SCRIPT).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn session_config(shell: &PathBuf) -> SessionConfig {
    SessionConfig {
        shell: shell.display().to_string(),
        prompt_marker: "ready>".into(),
        type_delay_ms: 5,
        expect_timeout_secs: 10,
        ..SessionConfig::default()
    }
}

#[test]
fn runs_commands_and_captures_their_output() {
    let tmp = TempDir::new().unwrap();
    let shell = fake_shell(&tmp);

    let instructions = Instructions {
        commands: vec!["echo alpha".into(), "echo beta".into()],
        expect: vec![Expect::Literal("alpha".into()), Expect::Prompt],
    };
    let session = TerminalSession::new(instructions, session_config(&shell), CancelToken::new());

    let memory = MemorySink::new();
    session.run(CaptureSink::new(Box::new(memory.clone()))).unwrap();

    let captured = memory.contents_lossy();
    assert!(captured.contains("alpha"), "captured: {captured}");
    assert!(captured.contains("beta"), "captured: {captured}");
}

#[test]
fn secret_input_never_reaches_the_capture_sink() {
    let tmp = TempDir::new().unwrap();
    let shell = fake_shell(&tmp);

    // The expectation text starting with "Password" marks the next command
    // as a secret answered to that prompt.
    let instructions = Instructions {
        commands: vec![
            r#"printf 'Password: '; read -r s; echo "len=${#s}""#.into(),
            "hunter2".into(),
        ],
        expect: vec![
            Expect::Literal("Password".into()),
            Expect::Literal("len=7".into()),
        ],
    };
    let session = TerminalSession::new(instructions, session_config(&shell), CancelToken::new());

    let memory = MemorySink::new();
    session.run(CaptureSink::new(Box::new(memory.clone()))).unwrap();

    let captured = memory.contents_lossy();
    assert!(captured.contains("Password"), "captured: {captured}");
    assert!(captured.contains("len=7"), "captured: {captured}");
    assert!(!captured.contains("hunter2"), "secret leaked: {captured}");
}

#[test]
fn unmatched_expectation_times_out() {
    let tmp = TempDir::new().unwrap();
    let shell = fake_shell(&tmp);

    let instructions = Instructions {
        commands: vec!["echo alpha".into()],
        expect: vec![Expect::Literal("never-printed".into())],
    };
    let mut config = session_config(&shell);
    config.expect_timeout_secs = 1;
    let session = TerminalSession::new(instructions, config, CancelToken::new());

    let result = session.run(CaptureSink::new(Box::new(MemorySink::new())));
    assert!(matches!(
        result,
        Err(docbot::PipelineError::Timeout { .. })
    ));
}
