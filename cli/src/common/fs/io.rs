//! # devrun Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers over `std::fs` that attach context to errors and map
//! "wrong kind of path" cases onto `DevrunError::FileSystem`:
//!
//! - `ensure_dir_exists`: `mkdir -p`, failing if the path is a file.
//! - `require_dir`: checks that an input directory exists.
//! - `read_file_to_string`: reads a whole file with the path in the error.
//!
use crate::core::error::{DevrunError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`, creating it and any missing
/// parents when needed.
///
/// # Errors
///
/// - The path exists but is not a directory (`DevrunError::FileSystem`).
/// - Creating the directory fails (e.g., permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DevrunError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Checks that `path` is an existing directory. Unlike
/// [`ensure_dir_exists`], nothing is created.
pub fn require_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!(DevrunError::FileSystem(format!(
            "Directory not found: {:?}",
            path
        )));
    }
    if !path.is_dir() {
        anyhow::bail!(DevrunError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Creates nested directories that do not exist yet.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());

        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());

        // Second call is a no-op.
        ensure_dir_exists(&new_dir)?;
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;

        let err = ensure_dir_exists(&file_path).unwrap_err();
        assert!(err
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_require_dir() -> Result<()> {
        let base_dir = tempdir()?;
        require_dir(base_dir.path())?;

        let missing = require_dir(&base_dir.path().join("missing")).unwrap_err();
        assert!(missing.to_string().contains("Directory not found"));

        let file_path = base_dir.path().join("file");
        fs::write(&file_path, "")?;
        assert!(matches!(
            require_dir(&file_path).unwrap_err().downcast_ref::<DevrunError>(),
            Some(DevrunError::FileSystem(_))
        ));
        Ok(())
    }

    #[test]
    fn test_read_file_to_string() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("notes.txt");
        fs::write(&file_path, "hello devrun")?;
        assert_eq!(read_file_to_string(&file_path)?, "hello devrun");

        let err = read_file_to_string(&base_dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
        Ok(())
    }
}
