//! # devrun Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `devrun run`: start a program in a working directory with its
//! output streamed to the terminal, wait for it to exit, and fail if it
//! exited unsuccessfully.
//!
//! ```bash
//! devrun run -C server -- go build -o edna .
//! devrun run -e GOPROXY=direct -- go get -u .
//! ```
//!
use super::ProgramArgs;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `devrun run`.
#[derive(Parser, Debug)]
#[command(about = "Run a program to completion in a working directory")]
pub struct RunArgs {
    #[command(flatten)]
    pub program: ProgramArgs,
}

/// Runs the program and waits for it. A non-zero exit becomes an error, which
/// `main` reports and turns into exit status 1.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let spec = args.program.to_spec();
    info!("Handling run command: {}", spec.command_line());
    spec.run_and_wait().await?;
    info!("'{}' finished successfully", spec.program());
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::error::DevrunError;

    #[tokio::test]
    async fn test_handle_run_success() {
        let args = RunArgs::try_parse_from(["run", "--", "true"]).unwrap();
        handle_run(args).await.unwrap();
    }

    #[tokio::test]
    async fn test_handle_run_failure_carries_exit_code() {
        let args = RunArgs::try_parse_from(["run", "--", "sh", "-c", "exit 7"]).unwrap();
        let err = handle_run(args).await.unwrap_err();
        match err.downcast_ref::<DevrunError>() {
            Some(DevrunError::Exit { code, .. }) => assert_eq!(*code, Some(7)),
            other => panic!("expected Exit error, got {:?}", other),
        }
    }
}
