//! # devrun Shutdown Signal Waiter (`common::signals`)
//!
//! File: cli/src/common/signals.rs
//!
//! ## Overview
//!
//! Suspends the caller until the user or the system asks devrun to stop, so
//! the caller can then cancel whatever it is supervising.
//!
//! Three notifications are observed:
//!
//! | Kind        | Unix      | Windows      |
//! |-------------|-----------|--------------|
//! | `Interrupt` | `SIGINT`  | `ctrl_c`     |
//! | `Quit`      | `SIGQUIT` | `ctrl_break` |
//! | `Terminate` | `SIGTERM` | `ctrl_close` |
//!
//! `SIGKILL` cannot be caught by any process, so the forced-stop slot is
//! served by `SIGQUIT` (Ctrl+\) instead.
//!
//! ## Architecture
//!
//! Interest is held by a [`ShutdownListener`] value rather than global state.
//! [`ShutdownListener::register`] installs it and [`ShutdownListener::wait`]
//! consumes it, so the listener moves from *waiting* to *signaled* exactly
//! once and is released on the only exit path. Tokio keeps its process-wide
//! OS handler installed afterwards; only this listener's interest goes away.
//!
//! Registering before launching a child closes the window where a Ctrl+C
//! would arrive with nobody listening.
//!
use crate::core::error::{DevrunError, Result};
use std::fmt;
use std::future::Future;
use tracing::{debug, info};

/// Which stop request arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Quit,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if cfg!(windows) {
            match self {
                ShutdownSignal::Interrupt => "Ctrl+C",
                ShutdownSignal::Quit => "Ctrl+Break",
                ShutdownSignal::Terminate => "console close",
            }
        } else {
            match self {
                ShutdownSignal::Interrupt => "SIGINT",
                ShutdownSignal::Quit => "SIGQUIT",
                ShutdownSignal::Terminate => "SIGTERM",
            }
        };
        f.write_str(name)
    }
}

/// Registered interest in the three shutdown notifications.
#[cfg(unix)]
pub struct ShutdownListener {
    interrupt: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

/// Registered interest in the three shutdown notifications.
#[cfg(windows)]
pub struct ShutdownListener {
    interrupt: tokio::signal::windows::CtrlC,
    quit: tokio::signal::windows::CtrlBreak,
    terminate: tokio::signal::windows::CtrlClose,
}

#[cfg(unix)]
impl ShutdownListener {
    /// Installs interest in `SIGINT`, `SIGQUIT` and `SIGTERM`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// `DevrunError::SignalRegistration` if the OS refuses any of them.
    pub fn register() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let register = |kind: SignalKind, name: &'static str| {
            signal(kind).map_err(|source| DevrunError::SignalRegistration {
                signal: name,
                source,
            })
        };

        let listener = Self {
            interrupt: register(SignalKind::interrupt(), "SIGINT")?,
            quit: register(SignalKind::quit(), "SIGQUIT")?,
            terminate: register(SignalKind::terminate(), "SIGTERM")?,
        };
        debug!("registered for SIGINT, SIGQUIT and SIGTERM");
        Ok(listener)
    }

    /// Suspends until one registered signal arrives, then releases the
    /// registration and reports which one it was.
    pub async fn wait(mut self) -> ShutdownSignal {
        let received = first_delivered(
            self.interrupt.recv(),
            self.quit.recv(),
            self.terminate.recv(),
        )
        .await;
        info!("received {}, shutting down", received);
        received
    }
}

#[cfg(windows)]
impl ShutdownListener {
    /// Installs interest in Ctrl+C, Ctrl+Break and console close events.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// `DevrunError::SignalRegistration` if the OS refuses any of them.
    pub fn register() -> Result<Self> {
        use tokio::signal::windows::{ctrl_break, ctrl_c, ctrl_close};

        let listener = Self {
            interrupt: ctrl_c().map_err(|source| DevrunError::SignalRegistration {
                signal: "Ctrl+C",
                source,
            })?,
            quit: ctrl_break().map_err(|source| DevrunError::SignalRegistration {
                signal: "Ctrl+Break",
                source,
            })?,
            terminate: ctrl_close().map_err(|source| DevrunError::SignalRegistration {
                signal: "console close",
                source,
            })?,
        };
        debug!("registered for Ctrl+C, Ctrl+Break and console close");
        Ok(listener)
    }

    /// Suspends until one registered event arrives, then releases the
    /// registration and reports which one it was.
    pub async fn wait(mut self) -> ShutdownSignal {
        let received = first_delivered(
            self.interrupt.recv(),
            self.quit.recv(),
            self.terminate.recv(),
        )
        .await;
        info!("received {}, shutting down", received);
        received
    }
}

/// Resolves with the first stream that actually delivers a notification.
///
/// `recv()` yields `None` once the signal driver is gone; such a stream is
/// ignored rather than taken as a stop request. If all three are gone the
/// wait never ends.
async fn first_delivered<I, Q, T>(interrupt: I, quit: Q, terminate: T) -> ShutdownSignal
where
    I: Future<Output = Option<()>>,
    Q: Future<Output = Option<()>>,
    T: Future<Output = Option<()>>,
{
    tokio::select! {
        Some(()) = interrupt => ShutdownSignal::Interrupt,
        Some(()) = quit => ShutdownSignal::Quit,
        Some(()) = terminate => ShutdownSignal::Terminate,
        else => {
            debug!("all shutdown signal streams closed");
            std::future::pending().await
        }
    }
}

/// Registers for shutdown notifications and waits for the first one.
///
/// Single shot, no timeout: the only way out is a signal.
#[allow(dead_code)] // `supervise` registers before launching, so it uses ShutdownListener directly.
pub async fn wait_for_shutdown_signal() -> Result<ShutdownSignal> {
    let listener = ShutdownListener::register()?;
    Ok(listener.wait().await)
}
