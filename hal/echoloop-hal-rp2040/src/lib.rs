//! RP2040 implementation of the echoloop peripheral driver interface
//!
//! Binds the `echoloop-hal` traits to embassy-rp:
//! - [`uart::Rp2040Serial`] - buffered UART transmit, task-driven armed receive
//! - [`timer::Rp2040Timer`] - periodic callbacks from pooled Ticker tasks
//!
//! Completion callbacks run from executor tasks rather than raw interrupt
//! handlers, which satisfies the same constant-time contract.

#![no_std]

pub mod timer;
pub mod uart;

// Re-export shared traits from echoloop-hal for convenience
pub use echoloop_hal::{Notify, PeriodicTimer, RxSink, SerialPort, TimerHandle};
