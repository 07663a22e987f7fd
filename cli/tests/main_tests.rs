//! # devrun CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behaviour: `--help`, `--version`, unknown subcommands.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag_lists_subcommands() {
    devrun_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("run")
            .and(predicate::str::contains("supervise"))
            .and(predicate::str::contains("copy"))
            .and(predicate::str::contains("ls"))
            .and(predicate::str::contains("deps")),
    );
}

#[test]
fn test_version_flag() {
    devrun_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_subcommand_version_is_propagated() {
    devrun_cmd()
        .args(["ls", "--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    devrun_cmd()
        .arg("bogus-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_missing_subcommand_fails() {
    devrun_cmd().assert().failure();
}
