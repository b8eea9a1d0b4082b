//! Board-agnostic core logic for the echoloop firmware
//!
//! This crate contains the application loop and everything it shares with
//! interrupt context, with no dependency on a specific chip:
//!
//! - Event flags set by driver callbacks and drained by the task loop
//! - The receive buffer and its driver/application ownership handoff
//! - The application state machine (`initialize` once, `tick` forever)
//! - Fixed protocol constants and application configuration
//!
//! Hardware is reached only through the `echoloop-hal` traits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod app;
pub mod buffer;
pub mod config;
pub mod flags;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, ApplicationState, Context};
pub use buffer::{BufferError, BufferOwner, ReceiveBuffer};
pub use config::{AppConfig, EchoMode, BUFFER_SIZE};
pub use flags::{EventFlags, Flag};
