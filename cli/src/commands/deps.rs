//! # devrun Dependency Refresh Command
//!
//! File: cli/src/commands/deps.rs
//!
//! ## Overview
//!
//! Implements `devrun deps`: runs a sequence of dependency-update commands,
//! one after another, with output streamed to the terminal. The first failing
//! step stops the sequence.
//!
//! ## Where the steps come from
//!
//! 1. `[[deps.steps]]` in the configuration, if any are defined.
//! 2. Otherwise they are detected from marker files in the working directory:
//!
//! | Marker         | Steps                            |
//! |----------------|----------------------------------|
//! | `go.mod`       | `go get -u .`, then `go mod tidy` |
//! | `Cargo.toml`   | `cargo update`                   |
//! | `package.json` | `npm update`                     |
//!
//! Environment for each step is layered: `deps.env`, then the step's own
//! `env`, then `-e KEY=VALUE` from the command line (later wins).
//!
//! ```bash
//! devrun deps                       # configured or detected steps
//! devrun deps -C server -e GOPROXY=direct
//! devrun deps --dry-run             # print the plan only
//! ```
//!
use super::parse_env_pair;
use crate::common::fs::io::require_dir;
use crate::common::process::ProcessSpec;
use crate::core::config::{self, DepsConfig};
use crate::core::error::{DevrunError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for `devrun deps`.
#[derive(Parser, Debug, Default)]
#[command(about = "Update project dependencies using configured or detected commands")]
pub struct DepsArgs {
    /// Working directory for steps without their own `dir` (overrides `deps.dir`)
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Extra environment variable for every step (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Print the steps that would run without running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Marker file and the commands it implies, in the order they are checked.
const DETECTORS: &[(&str, &[&[&str]])] = &[
    ("go.mod", &[&["go", "get", "-u", "."], &["go", "mod", "tidy"]]),
    ("Cargo.toml", &[&["cargo", "update"]]),
    ("package.json", &[&["npm", "update"]]),
];

pub async fn handle_deps(args: DepsArgs, config_path: Option<PathBuf>) -> Result<()> {
    info!("Handling deps command with args: {:?}", args);
    let cfg = config::load_config(config_path.as_deref())?;
    let plan = plan_steps(&cfg.deps, args.dir.as_deref(), &args.env)?;

    if args.dry_run {
        println!("Dependency update plan ({} steps):", plan.len());
        for (i, step) in plan.iter().enumerate() {
            println!(
                "  {}. {} (in '{}')",
                i + 1,
                step.command_line(),
                step.working_dir().display()
            );
        }
        return Ok(());
    }

    refresh_dependencies(&plan).await
}

/// Resolves the configured (or detected) steps into launch descriptions.
pub fn plan_steps(
    deps: &DepsConfig,
    dir_override: Option<&Path>,
    cli_env: &[(String, String)],
) -> Result<Vec<ProcessSpec>> {
    let base_dir = dir_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&deps.dir));

    let shared_env = || deps.env.iter().map(|(k, v)| (k.clone(), v.clone()));
    let top_env = || cli_env.iter().cloned();

    // Shared env goes below each step's own env, the CLI env on top.
    let plan = if deps.steps.is_empty() {
        detect_steps(&base_dir)?
            .into_iter()
            .map(|spec| spec.envs(shared_env()).envs(top_env()))
            .collect()
    } else {
        deps.steps
            .iter()
            .map(|step| {
                let dir = step
                    .dir
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| base_dir.clone());
                ProcessSpec::new(step.program.clone())
                    .args(step.args.iter().cloned())
                    .current_dir(dir)
                    .envs(shared_env())
                    .envs(step.env.iter().map(|(k, v)| (k.clone(), v.clone())))
                    .envs(top_env())
            })
            .collect()
    };
    Ok(plan)
}

/// Detects dependency-update commands from marker files in `dir`.
pub fn detect_steps(dir: &Path) -> Result<Vec<ProcessSpec>> {
    require_dir(dir).context("Invalid dependency update directory")?;

    let mut steps = Vec::new();
    for (marker, commands) in DETECTORS {
        if !dir.join(marker).is_file() {
            continue;
        }
        debug!("found {} in {:?}", marker, dir);
        for command in commands.iter() {
            let (program, args) = command
                .split_first()
                .ok_or_else(|| anyhow!("empty detector command for {}", marker))?;
            steps.push(
                ProcessSpec::new(*program)
                    .args(args.iter().copied())
                    .current_dir(dir),
            );
        }
    }

    if steps.is_empty() {
        return Err(anyhow!(DevrunError::Config(format!(
            "No [[deps.steps]] configured and no go.mod, Cargo.toml or package.json found in '{}'",
            dir.display()
        ))));
    }
    Ok(steps)
}

/// Runs each step to completion in order, stopping at the first failure.
pub async fn refresh_dependencies(plan: &[ProcessSpec]) -> Result<()> {
    let total = plan.len();
    for (i, step) in plan.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, total, step.command_line());
        step.run_and_wait()
            .await
            .with_context(|| format!("Dependency update step '{}' failed", step.command_line()))?;
    }
    println!("Dependencies updated ({} steps).", total);
    Ok(())
}
