//! # devrun CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each other `.rs`
//! file in this directory is compiled as its own test crate and runs the
//! compiled `devrun` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// `assert_cmd::Command` pointing at the `devrun` binary built for this test
/// run. `RUST_LOG` is cleared so log output does not depend on the caller's
/// environment, and `DEVRUN_CONFIG` is cleared so a developer's setting does
/// not leak in.
pub fn devrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("devrun").expect("Failed to find devrun binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("DEVRUN_CONFIG");
    cmd
}

/// Path of the compiled `devrun` binary, for tests that need a plain
/// `std::process::Command` (e.g. to signal the running process).
pub fn devrun_bin() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin("devrun")
}

/// Writes `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().expect("file path has a parent"))
        .expect("Failed to create parent directories");
    std::fs::write(path, content).expect("Failed to write test file");
}
