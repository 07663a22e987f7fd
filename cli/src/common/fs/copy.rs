//! # devrun Recursive File Copy
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Copies every file below a source directory into a destination directory,
//! recreating the relative directory structure. Used by `devrun copy` to stage
//! build outputs (for example copying a frontend `dist/` into a server's
//! embedded assets folder).
//!
//! ## Architecture
//!
//! - Traversal uses `walkdir`, sorted by file name so logs are stable.
//! - Each file is copied with `fs_extra::file::copy`, overwriting existing
//!   files at the destination.
//! - Symbolic links are not followed and are skipped with a debug log.
//! - A destination inside the source tree is rejected up front, since the walk
//!   would otherwise pick up its own output.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//! use std::path::Path;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let summary = copy::copy_files_recursive(Path::new("frontend/dist"), Path::new("server/dist"))?;
//! println!("copied {} files", summary.files);
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::io::{ensure_dir_exists, require_dir};
use crate::core::error::{DevrunError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// What a recursive copy did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Number of regular files copied.
    pub files: usize,
    /// Total bytes written.
    pub bytes: u64,
}

/// Copies all files under `source` into `target`, preserving relative paths.
///
/// `target` and any intermediate directories are created when missing.
/// Existing files in `target` are overwritten; files in `target` that have no
/// counterpart in `source` are left alone.
///
/// # Errors
///
/// - `source` is missing or not a directory.
/// - `target` exists as a file, or lies inside `source`.
/// - Any individual directory creation or file copy fails (the copy stops at
///   the first failure; files copied before it stay in place).
pub fn copy_files_recursive(source: &Path, target: &Path) -> Result<CopySummary> {
    info!("copy_files_recursive('{}', '{}')", source.display(), target.display());
    require_dir(source).context("Invalid copy source")?;

    if let (Ok(src_abs), Some(dst_abs)) = (source.canonicalize(), resolve_target(target)) {
        if dst_abs.starts_with(&src_abs) {
            anyhow::bail!(DevrunError::FileSystem(format!(
                "Copy target {:?} is inside source {:?}",
                target, source
            )));
        }
    }

    ensure_dir_exists(target)?;

    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;

    let mut summary = CopySummary::default();
    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", source))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{:?} is not under {:?}", entry.path(), source))?;
        let destination = target.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            ensure_dir_exists(&destination)?;
        } else if file_type.is_file() {
            let bytes = fs_extra::file::copy(entry.path(), &destination, &options).map_err(|e| {
                anyhow::anyhow!(e).context(format!(
                    "Failed to copy {:?} to {:?}",
                    entry.path(),
                    destination
                ))
            })?;
            debug!("copied {:?} to {:?} ({} bytes)", entry.path(), destination, bytes);
            summary.files += 1;
            summary.bytes += bytes;
        } else {
            debug!("skipping non-regular entry {:?}", entry.path());
        }
    }

    info!("copied {} files ({} bytes)", summary.files, summary.bytes);
    Ok(summary)
}

/// Absolute form of a copy target that may not exist yet: canonicalize it if
/// it exists, otherwise canonicalize its parent and re-append the last
/// component. `None` when neither is possible.
fn resolve_target(target: &Path) -> Option<PathBuf> {
    if let Ok(abs) = target.canonicalize() {
        return Some(abs);
    }
    let name = target.file_name()?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}
