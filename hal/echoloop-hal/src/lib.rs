//! echoloop Hardware Abstraction Layer
//!
//! This crate defines the peripheral driver interface the application loop
//! consumes: a callback-driven UART and a periodic-callback timer service.
//! Chip-specific HALs implement these traits; the core crate only ever talks
//! to them through the traits, which keeps it testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (echoloop-core)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  echoloop-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ echoloop-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialPort`] - Non-blocking transmit, armed receive
//! - [`uart::RxSink`] - Landing zone a driver fills on receive completion
//! - [`timer::PeriodicTimer`] - Periodic callbacks
//! - [`Notify`] - Completion callback invoked from interrupt context

#![no_std]
#![deny(unsafe_code)]

pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use timer::{PeriodicTimer, TimerHandle};
pub use uart::{DeliveryError, RxSink, SerialPort, UartConfig};

/// Completion callback
///
/// Drivers hold a `&'static dyn Notify` and call [`Notify::notify`] when the
/// operation it was registered for completes. The implementor is the
/// callback's context.
///
/// Runs in interrupt context: implementations must be constant-time, must
/// not block and must not allocate.
pub trait Notify: Sync {
    /// Signal that the registered event occurred
    fn notify(&self);
}
