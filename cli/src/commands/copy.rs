//! # devrun Copy Command
//!
//! File: cli/src/commands/copy.rs
//!
//! Implements `devrun copy SRC DST`: copies every file below `SRC` into
//! `DST`, keeping relative paths and overwriting existing files.
//!
use crate::common::fs::copy::copy_files_recursive;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `devrun copy`.
#[derive(Parser, Debug)]
#[command(about = "Recursively copy files from one directory into another")]
pub struct CopyArgs {
    /// Directory to copy from
    pub source: PathBuf,
    /// Directory to copy into (created if missing)
    pub target: PathBuf,
}

pub async fn handle_copy(args: CopyArgs) -> Result<()> {
    info!("Handling copy command with args: {:?}", args);
    let summary = copy_files_recursive(&args.source, &args.target)?;
    println!(
        "copied {} files ({} bytes) from '{}' to '{}'",
        summary.files,
        summary.bytes,
        args.source.display(),
        args.target.display()
    );
    Ok(())
}
