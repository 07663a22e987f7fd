//! # devrun Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem helpers used by the `copy`, `ls` and `deps`
//! commands and by configuration loading.
//!
//! - **`copy`**: recursive file copy preserving relative paths (`walkdir` + `fs_extra`).
//! - **`io`**: directory checks and file reading with error context.
//! - **`listing`**: sorted, relative file listing with hidden/depth filters.
//!
//! Callers import from the submodule directly, e.g.
//! `crate::common::fs::copy::copy_files_recursive`.
//!

/// Recursive copy (`copy_files_recursive`, `CopySummary`).
pub mod copy;
/// Basic I/O helpers (`ensure_dir_exists`, `require_dir`, `read_file_to_string`).
pub mod io;
/// Directory listing (`list_files`, `ListOptions`).
pub mod listing;
