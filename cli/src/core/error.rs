//! # devrun Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy shared by every part of devrun.
//!
//! ## Architecture
//!
//! The error system consists of two pieces:
//! - `DevrunError`: a `thiserror` enum naming each failure category
//! - `Result<T>`: an alias for `anyhow::Result<T>` so callers can attach context
//!
//! Process failures fall into three categories:
//! - `Launch`: the child could not be spawned (missing executable, bad working
//!   directory, permission denied). Sub-causes are not distinguished.
//! - `Exit`: the child ran but exited with a non-zero or abnormal status.
//! - `SignalRegistration`: the OS refused to register interest in a shutdown
//!   signal. Commands that need the waiter treat this as fatal.
//!
//! ## Examples
//!
//! ```rust
//! match process::run_and_wait(dir, "make", &["build"]).await {
//!     Ok(()) => println!("build finished"),
//!     Err(e) if matches!(e.downcast_ref::<DevrunError>(), Some(DevrunError::Exit { .. })) => {
//!         println!("build failed: {}", e);
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the devrun application.
#[derive(Error, Debug)]
pub enum DevrunError {
    #[error("Failed to launch '{program}' in directory '{}': {source}", dir.display())]
    Launch {
        program: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Exit {
        program: String,
        status: String,
        code: Option<i32>,
    },

    #[error("Failed to register for {signal} notifications: {source}")]
    SignalRegistration {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let launch = DevrunError::Launch {
            program: "missing-tool".into(),
            dir: PathBuf::from("/tmp/work"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            launch.to_string(),
            "Failed to launch 'missing-tool' in directory '/tmp/work': not found"
        );

        let exit = DevrunError::Exit {
            program: "make".into(),
            status: "exit status: 2".into(),
            code: Some(2),
        };
        assert_eq!(exit.to_string(), "'make' exited with exit status: 2");

        let config_err = DevrunError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );
    }

    #[test]
    fn test_launch_error_exposes_source() {
        use std::error::Error as _;
        let err = DevrunError::Launch {
            program: "x".into(),
            dir: PathBuf::from("."),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = DevrunError::FileSystem("boom".into()).into();
        let err = err.context("while copying");
        assert!(matches!(
            err.downcast_ref::<DevrunError>(),
            Some(DevrunError::FileSystem(_))
        ));
    }
}
