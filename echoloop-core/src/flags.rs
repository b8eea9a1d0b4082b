//! Event flags bridging interrupt context to the task loop
//!
//! Each flag is a single-slot signal with overwrite semantics: only presence
//! matters, not how many times it was set before the task loop looked.

use echoloop_hal::Notify;
use portable_atomic::{AtomicBool, Ordering};

/// Boolean signal set from interrupt context, taken by the task loop
#[derive(Debug, Default)]
pub struct Flag(AtomicBool);

impl Flag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Set the flag. Safe to call from interrupt context.
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Read and clear in one step
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Peek without clearing
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Notify for Flag {
    fn notify(&self) {
        self.set();
    }
}

/// The two application event flags
#[derive(Debug, Default)]
pub struct EventFlags {
    received: Flag,
    periodic: Flag,
}

impl EventFlags {
    /// Create with both flags cleared
    pub const fn new() -> Self {
        Self {
            received: Flag::new(),
            periodic: Flag::new(),
        }
    }

    /// Mark a receive as completed
    pub fn set_received(&self) {
        self.received.set();
    }

    /// Mark a timer tick
    pub fn set_periodic(&self) {
        self.periodic.set();
    }

    /// Consume a pending receive completion
    pub fn take_received(&self) -> bool {
        self.received.take()
    }

    /// Consume a pending timer tick
    pub fn take_periodic(&self) -> bool {
        self.periodic.take()
    }

    /// Callback to register for receive completion
    pub fn received_callback(&'static self) -> &'static dyn Notify {
        &self.received
    }

    /// Callback to register with the timer service
    pub fn periodic_callback(&'static self) -> &'static dyn Notify {
        &self.periodic
    }
}
