//! # devrun Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`:
//!
//! - **`process`**: the supervised process runner (`launch`, `run_and_wait`,
//!   `ProcessHandle::cancel`).
//! - **`signals`**: the shutdown signal waiter (`wait_for_shutdown_signal`).
//! - **`fs`**: recursive copy, directory listing and small I/O helpers.
//!
//! A typical supervision loop combines the first two:
//!
//! ```rust
//! use crate::common::{process, signals};
//! use std::path::Path;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let listener = signals::ShutdownListener::register()?;
//! let mut server = process::launch(Path::new("server"), "./server", &["-dev"])?;
//! listener.wait().await;
//! server.cancel();
//! # Ok(())
//! # }
//! ```
//!

/// Filesystem operations (copy, listing, I/O).
pub mod fs;
/// Launching, waiting on and cancelling child processes.
pub mod process;
/// Waiting for interrupt / quit / terminate requests.
pub mod signals;
