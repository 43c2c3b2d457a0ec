//! # hio
//!
//! Hardware I/O boundary for the deferred work pipeline. The core never
//! touches peripheral registers; it consumes the narrow interfaces defined
//! here: read or drive a pin, poll a button, pull a line of console input.
//!
//! ## Module Overview
//! - [`gpio`]    – Pin levels, directions and the port trait, plus an
//!   in-memory simulated port for host tests.
//! - [`button`]  – Polled button driver behind the [`DigitalInput`] trait,
//!   built from explicit configuration via [`build_buttons`].
//! - [`console`] – Blocking line input behind the [`LineSource`] trait.

use thiserror::Error;

pub mod button;
pub mod console;
pub mod gpio;

pub use button::{build_buttons, Button, ButtonConfig, DigitalInput};
pub use console::{LineSource, ScriptedLines, StdinLines};
pub use gpio::{Direction, Gpio, Level, SimPort};

/// Errors surfaced by the hardware I/O boundary.
///
/// `NotReady` and `Configure` are setup-time failures: the owning task logs
/// them and never enters its loop. `Io` is a per-access failure recovered at
/// the point of occurrence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    #[error("device {0} is not ready")]
    NotReady(&'static str),
    #[error("failed to configure pin {pin}")]
    Configure { pin: u8 },
    #[error("i/o failure on pin {pin}")]
    Io { pin: u8 },
}

pub type HalResult<T> = Result<T, HalError>;
