//! # devrun Supervised Process Runner (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! This module starts external programs in a given working directory with
//! their standard output and standard error connected to devrun's own streams,
//! so child output appears inline with devrun's output.
//!
//! Two entry points cover the common cases:
//!
//! - [`launch`]: spawn and return immediately with a [`ProcessHandle`]. The
//!   handle's [`ProcessHandle::cancel`] sends a forced termination request
//!   without waiting for the child to exit.
//! - [`run_and_wait`]: spawn and suspend until the child exits. A non-zero or
//!   abnormal exit becomes a `DevrunError::Exit`.
//!
//! [`ProcessSpec`] is the builder behind both and additionally carries extra
//! environment variables (used by `devrun deps` and the `-e` flags).
//!
//! ## Architecture
//!
//! - Built on `tokio::process::Command`, so both entry points must run inside
//!   a Tokio runtime.
//! - stdin is connected to the null device; stdout and stderr are inherited.
//! - Every spawn failure (executable not found, working directory missing,
//!   permission denied) is reported as a single `DevrunError::Launch`.
//! - Dropping a `ProcessHandle` does not kill the child. Only `cancel` does.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//! use std::path::Path;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! // Run to completion.
//! process::run_and_wait(Path::new("server"), "go", &["mod", "tidy"]).await?;
//!
//! // Start in the background, then stop it.
//! let mut handle = process::launch(Path::new("."), "sleep", &["30"])?;
//! handle.cancel();
//! let _status = handle.wait().await?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{DevrunError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Description of one process launch: program, arguments, working directory
/// and extra environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
    env: Vec<(String, String)>,
}

impl ProcessSpec {
    /// Creates a spec for `program` with no arguments, running in `.`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: PathBuf::from("."),
            env: Vec::new(),
        }
    }

    /// Appends arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory of the child.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Adds one environment variable on top of the inherited environment.
    /// A later value for the same key wins.
    #[allow(dead_code)]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Adds several environment variables, in iteration order.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.dir
    }

    /// Extra environment variables in the order they were added.
    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    /// Program followed by its arguments, space separated. Used for log lines
    /// and error context; not meant to be re-parsed by a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.dir)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    fn spawn(&self) -> Result<Child> {
        info!(
            "running: {} in dir '{}'",
            self.command_line(),
            self.dir.display()
        );
        if !self.env.is_empty() {
            debug!("extra environment: {:?}", self.env);
        }
        self.to_command().spawn().map_err(|source| {
            anyhow::Error::new(DevrunError::Launch {
                program: self.program.clone(),
                dir: self.dir.clone(),
                source,
            })
        })
    }

    /// Spawns the process and returns without waiting for it.
    ///
    /// # Errors
    ///
    /// `DevrunError::Launch` if the process could not be started.
    pub fn launch(&self) -> Result<ProcessHandle> {
        let child = self.spawn()?;
        let pid = child.id();
        debug!("'{}' started with pid {:?}", self.program, pid);
        Ok(ProcessHandle {
            child,
            pid,
            program: self.program.clone(),
            working_dir: self.dir.clone(),
            cancel_requested: false,
        })
    }

    /// Spawns the process and waits for it to exit.
    ///
    /// # Errors
    ///
    /// - `DevrunError::Launch` if the process could not be started.
    /// - `DevrunError::Exit` if it exited with a non-zero or abnormal status.
    pub async fn run_and_wait(&self) -> Result<()> {
        let mut handle = self.launch()?;
        handle.wait_success().await
    }
}

/// A running child process, exclusively owned by whoever launched it.
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    pid: Option<u32>,
    program: String,
    working_dir: PathBuf,
    cancel_requested: bool,
}

impl ProcessHandle {
    /// OS process id captured at spawn time.
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Whether [`cancel`](Self::cancel) has been called on this handle.
    #[allow(dead_code)]
    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Sends a forced termination request to the child.
    ///
    /// Best effort: does not wait for the child to exit and does not report
    /// whether termination succeeded. Calling it again, or after the child
    /// has already exited and been reaped, is a no-op.
    pub fn cancel(&mut self) {
        if self.cancel_requested {
            debug!("cancel already requested for '{}'", self.program);
            return;
        }
        self.cancel_requested = true;

        match self.child.start_kill() {
            Ok(()) => info!(
                "sent termination request to '{}' (pid {:?})",
                self.program, self.pid
            ),
            // tokio reports InvalidInput once the child has been reaped.
            Err(e) => debug!(
                "termination request for '{}' not delivered (already exited?): {}",
                self.program, e
            ),
        }
    }

    /// Returns the exit status if the child has exited, `None` while it is
    /// still running. Never blocks.
    #[allow(dead_code)]
    pub fn try_status(&mut self) -> Result<Option<ExitStatus>> {
        self.child
            .try_wait()
            .with_context(|| format!("Failed to poll status of '{}'", self.program))
    }

    /// Waits for the child to exit and returns its raw status.
    ///
    /// Cancel safe: dropping the future leaves the child running and the
    /// handle usable.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self
            .child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for '{}'", self.program))?;
        debug!("'{}' (pid {:?}) exited: {}", self.program, self.pid, status);
        Ok(status)
    }

    /// Waits for the child and maps a non-zero or abnormal exit to
    /// `DevrunError::Exit`.
    pub async fn wait_success(&mut self) -> Result<()> {
        let status = self.wait().await?;
        check_exit_status(&self.program, status)
    }
}

/// Spawns `program` with `args` in `dir` and returns its handle without
/// waiting. See [`ProcessSpec::launch`].
#[allow(dead_code)] // Commands go through ProcessSpec; kept as the plain-argument entry point.
pub fn launch<S: AsRef<str>>(dir: &Path, program: &str, args: &[S]) -> Result<ProcessHandle> {
    ProcessSpec::new(program)
        .args(args.iter().map(|a| a.as_ref().to_string()))
        .current_dir(dir)
        .launch()
}

/// Spawns `program` with `args` in `dir` and waits for it to exit. See
/// [`ProcessSpec::run_and_wait`].
#[allow(dead_code)] // Commands go through ProcessSpec; kept as the plain-argument entry point.
pub async fn run_and_wait<S: AsRef<str>>(dir: &Path, program: &str, args: &[S]) -> Result<()> {
    ProcessSpec::new(program)
        .args(args.iter().map(|a| a.as_ref().to_string()))
        .current_dir(dir)
        .run_and_wait()
        .await
}

/// Converts an exit status into `Ok(())` or `DevrunError::Exit`.
pub fn check_exit_status(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    debug!("'{}' exited with {}", program, status);
    Err(DevrunError::Exit {
        program: program.to_string(),
        status: status.to_string(),
        code: status.code(),
    }
    .into())
}
