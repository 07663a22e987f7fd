//! # devrun Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the devrun CLI. It:
//! - parses command-line arguments with Clap
//! - sets up `tracing` output on stderr based on `-v` (or `RUST_LOG`)
//! - routes to the handler of the selected subcommand
//! - prints any error and exits with status 1
//!
//! ## Examples
//!
//! ```bash
//! # Keep a dev server running until Ctrl+C
//! devrun supervise -C server -- go run . -run-dev
//!
//! # Stage frontend output next to the server, then check it
//! devrun copy frontend/dist server/dist
//! devrun ls server/dist
//!
//! # Refresh dependencies with extra logging
//! devrun -vv deps -e GOPROXY=direct
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (run, supervise, copy, ls, deps)
mod common; // Process runner, shutdown signals, filesystem helpers
mod core; // Configuration and error types

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "devrun",
    about = "Developer task runner: supervised processes, file staging and dependency refresh",
    long_about = "Run and supervise development processes, stage files between directories,\n\
                  and refresh project dependencies from one small CLI.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file to use instead of the project/user files
    #[arg(long, global = true, env = "DEVRUN_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "sv")]
    Supervise(commands::supervise::SuperviseArgs),
    #[command(alias = "cp")]
    Copy(commands::copy::CopyArgs),
    Ls(commands::ls::LsArgs),
    Deps(commands::deps::DepsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Supervise(args) => commands::supervise::handle_supervise(args).await,
        Commands::Copy(args) => commands::copy::handle_copy(args).await,
        Commands::Ls(args) => commands::ls::handle_ls(args).await,
        Commands::Deps(args) => commands::deps::handle_deps(args, cli.config).await,
    };

    if let Err(e) = command_result {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
