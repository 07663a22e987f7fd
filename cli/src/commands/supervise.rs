//! # devrun Supervise Command
//!
//! File: cli/src/commands/supervise.rs
//!
//! ## Overview
//!
//! Implements `devrun supervise`: keep a long-running program (typically a dev
//! server) alive until either it exits by itself or devrun receives Ctrl+C,
//! Ctrl+\ or SIGTERM, in which case the program is cancelled and reaped.
//!
//! ```bash
//! devrun supervise -C server -- go run . -run-dev
//! ```
//!
//! ## Flow
//!
//! 1. Register the shutdown listener (before launching, so an early Ctrl+C is
//!    not lost).
//! 2. Launch the program and print its pid.
//! 3. Race the program's exit against the shutdown signal.
//! 4. On a signal: cancel the program and wait up to `STOP_TIMEOUT` for it
//!    to go away.
//!
use super::ProgramArgs;
use crate::common::process::check_exit_status;
use crate::common::signals::{ShutdownListener, ShutdownSignal};
use crate::core::error::Result;
use clap::Parser;
use std::process::ExitStatus;
use std::time::Duration;
use tracing::{info, warn};

/// How long to wait for the program to disappear after cancelling it.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Arguments for `devrun supervise`.
#[derive(Parser, Debug)]
#[command(about = "Run a program until it exits or devrun is interrupted")]
pub struct SuperviseArgs {
    #[command(flatten)]
    pub program: ProgramArgs,
}

enum Outcome {
    Exited(Result<ExitStatus>),
    Signaled(ShutdownSignal),
}

pub async fn handle_supervise(args: SuperviseArgs) -> Result<()> {
    let spec = args.program.to_spec();
    info!("Handling supervise command: {}", spec.command_line());

    let listener = ShutdownListener::register()?;
    let mut child = spec.launch()?;

    let pid = child
        .id()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "Supervising '{}' in '{}' (pid {}). Press Ctrl+C to stop.",
        spec.command_line(),
        child.working_dir().display(),
        pid
    );

    let outcome = tokio::select! {
        status = child.wait() => Outcome::Exited(status),
        signal = listener.wait() => Outcome::Signaled(signal),
    };

    match outcome {
        Outcome::Exited(status) => {
            let status = status?;
            println!("'{}' exited on its own ({}).", child.program(), status);
            check_exit_status(child.program(), status)
        }
        Outcome::Signaled(signal) => {
            println!("Received {}, stopping '{}'...", signal, child.program());
            child.cancel();
            match tokio::time::timeout(STOP_TIMEOUT, child.wait()).await {
                Ok(status) => {
                    let status = status?;
                    println!("Stopped '{}' ({}).", child.program(), status);
                }
                Err(_) => warn!(
                    "'{}' (pid {}) did not exit within {:?} of cancellation",
                    child.program(),
                    pid,
                    STOP_TIMEOUT
                ),
            }
            Ok(())
        }
    }
}
