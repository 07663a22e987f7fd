//! # devrun Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level subcommand. Each defines its Clap argument
//! struct and an async `handle_*` function called from `main.rs`:
//!
//! - `run`: run a program to completion in a directory
//! - `supervise`: run a program until it exits or devrun is asked to stop
//! - `copy`: recursively copy files between directories
//! - `ls`: list files under a directory
//! - `deps`: run the configured (or detected) dependency-update commands
//!
//! Argument types shared by `run` and `supervise` live here.
//!
use crate::common::process::ProcessSpec;
use crate::core::config::validate_env_key;
use clap::Args;
use std::path::PathBuf;

pub mod copy;
pub mod deps;
pub mod ls;
pub mod run;
pub mod supervise;

/// Program, arguments, working directory and extra environment for commands
/// that start a single child process.
#[derive(Args, Debug, Clone)]
pub struct ProgramArgs {
    /// Working directory for the program
    #[arg(short = 'C', long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Extra environment variable for the program (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Program to run followed by its arguments (use `--` before flags meant for the program)
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl ProgramArgs {
    /// Builds the launch description. `command` is non-empty (enforced by Clap).
    pub fn to_spec(&self) -> ProcessSpec {
        let (program, args) = match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[][..]),
        };
        ProcessSpec::new(program)
            .args(args.iter().cloned())
            .current_dir(&self.dir)
            .envs(self.env.iter().cloned())
    }
}

/// Parses `KEY=VALUE` for `-e/--env`. The value may be empty or contain `=`.
pub fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    validate_env_key(key)?;
    Ok((key.to_string(), value.to_string()))
}
