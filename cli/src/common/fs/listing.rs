//! # devrun Directory Listing
//!
//! File: cli/src/common/fs/listing.rs
//!
//! ## Overview
//!
//! Lists the files below a directory as paths relative to that directory,
//! sorted, for `devrun ls`. Handy for checking what a build step actually
//! produced before it gets copied or embedded.
//!
//! Hidden entries (names starting with `.`) are skipped unless asked for;
//! skipping a hidden directory skips everything inside it.
//!
use crate::common::fs::io::require_dir;
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Options for [`list_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Include entries whose name starts with `.`.
    pub include_hidden: bool,
    /// Maximum depth below the root (1 = direct children only). `None` means
    /// unlimited.
    pub max_depth: Option<usize>,
}

/// Returns every regular file under `root`, relative to `root`, in sorted
/// order.
pub fn list_files(root: &Path, options: ListOptions) -> Result<Vec<PathBuf>> {
    require_dir(root)?;

    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    let entries = walker
        .into_iter()
        .filter_entry(|e| options.include_hidden || e.depth() == 0 || !is_hidden(e));
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{:?} is not under {:?}", entry.path(), root))?;
        files.push(relative.to_path_buf());
    }

    files.sort();
    debug!("listed {} files under {:?}", files.len(), root);
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let temp = tempdir().unwrap();
        touch(temp.path(), "b.txt");
        touch(temp.path(), "a/z.rs");
        touch(temp.path(), "a/deep/x.rs");
        touch(temp.path(), ".env");
        touch(temp.path(), ".git/HEAD");
        temp
    }

    #[test]
    fn test_lists_relative_sorted_without_hidden() {
        let temp = fixture();
        let files = list_files(temp.path(), ListOptions::default()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a/deep/x.rs"),
                PathBuf::from("a/z.rs"),
                PathBuf::from("b.txt"),
            ]
        );
    }

    #[test]
    fn test_include_hidden() {
        let temp = fixture();
        let files = list_files(
            temp.path(),
            ListOptions {
                include_hidden: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(files.len(), 5);
        assert!(files.contains(&PathBuf::from(".git/HEAD")));
        assert!(files.contains(&PathBuf::from(".env")));
    }

    #[test]
    fn test_max_depth() {
        let temp = fixture();
        let files = list_files(
            temp.path(),
            ListOptions {
                max_depth: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(files, vec![PathBuf::from("a/z.rs"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_hidden_root_is_still_listed() {
        let temp = tempdir().unwrap();
        touch(temp.path(), ".hidden-root/file.txt");
        let files = list_files(&temp.path().join(".hidden-root"), ListOptions::default()).unwrap();
        assert_eq!(files, vec![PathBuf::from("file.txt")]);
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = tempdir().unwrap();
        assert!(list_files(&temp.path().join("missing"), ListOptions::default()).is_err());
    }
}
