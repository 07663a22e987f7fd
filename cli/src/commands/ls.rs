//! # devrun Ls Command
//!
//! File: cli/src/commands/ls.rs
//!
//! Implements `devrun ls [DIR]`: prints every file under `DIR` relative to it,
//! one per line in sorted order, followed by a count.
//!
//! ```bash
//! devrun ls frontend/dist
//! devrun ls --all --max-depth 2 .
//! ```
//!
use crate::common::fs::listing::{list_files, ListOptions};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `devrun ls`.
#[derive(Parser, Debug)]
#[command(about = "List files under a directory")]
pub struct LsArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Include hidden files and directories (names starting with '.')
    #[arg(short, long)]
    pub all: bool,

    /// Maximum depth to descend (1 = direct children only)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_depth: Option<u32>,
}

pub async fn handle_ls(args: LsArgs) -> Result<()> {
    info!("Handling ls command with args: {:?}", args);
    let options = ListOptions {
        include_hidden: args.all,
        max_depth: args.max_depth.map(|d| d as usize),
    };
    let files = list_files(&args.dir, options)?;
    for file in &files {
        println!("{}", file.display());
    }
    println!("{} files", files.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_args_defaults() {
        let args = LsArgs::try_parse_from(["ls"]).unwrap();
        assert_eq!(args.dir, PathBuf::from("."));
        assert!(!args.all);
        assert_eq!(args.max_depth, None);
    }

    #[test]
    fn test_ls_args_rejects_zero_depth() {
        assert!(LsArgs::try_parse_from(["ls", "--max-depth", "0"]).is_err());
        let args = LsArgs::try_parse_from(["ls", "-a", "--max-depth", "2", "src"]).unwrap();
        assert_eq!(args.max_depth, Some(2));
        assert!(args.all);
        assert_eq!(args.dir, PathBuf::from("src"));
    }
}
