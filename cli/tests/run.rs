//! # devrun CLI Run Integration Tests
//!
//! File: cli/tests/run.rs
//!
//! `devrun run`: child output reaches devrun's own streams, the working
//! directory and `-e` variables are honoured, and the exit status decides
//! devrun's.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_run_streams_child_stdout_and_stderr() {
    devrun_cmd()
        .args(["run", "--", "sh", "-c", "echo to-stdout; echo to-stderr >&2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to-stdout"))
        .stderr(predicate::str::contains("to-stderr"));
}

#[test]
fn test_run_in_working_dir_with_env() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "marker.txt", "present");

    devrun_cmd()
        .args(["run", "-C"])
        .arg(temp.path())
        .args(["-e", "GREETING=hello", "--", "sh", "-c", "cat marker.txt; echo \" $GREETING\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("present hello"));
}

#[test]
fn test_run_nonzero_exit_fails() {
    devrun_cmd()
        .args(["run", "--", "sh", "-c", "exit 4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'sh' exited with"));
}

#[test]
fn test_run_missing_program_fails_to_launch() {
    devrun_cmd()
        .args(["run", "--", "nonexistent_devrun_test_binary_4821"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to launch 'nonexistent_devrun_test_binary_4821'",
        ));
}

#[test]
fn test_run_failure_is_reported_once() {
    let once = |needle: &'static str| {
        predicate::function(move |stderr: &str| stderr.matches(needle).count() == 1)
    };

    devrun_cmd()
        .args(["run", "--", "nonexistent_devrun_test_binary_4821"])
        .assert()
        .failure()
        .stderr(once("nonexistent_devrun_test_binary_4821"));

    devrun_cmd()
        .args(["run", "--", "sh", "-c", "exit 4"])
        .assert()
        .failure()
        .stderr(once("exited with"));
}

#[test]
fn test_run_missing_dir_fails_to_launch() {
    let temp = tempdir().unwrap();
    devrun_cmd()
        .args(["run", "-C"])
        .arg(temp.path().join("missing"))
        .args(["--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch 'true'"));
}

#[test]
fn test_run_rejects_malformed_env() {
    devrun_cmd()
        .args(["run", "-e", "NOEQUALS", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}
