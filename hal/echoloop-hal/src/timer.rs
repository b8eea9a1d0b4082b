//! Periodic timer service abstractions

use crate::Notify;

/// Opaque handle returned by the timer service
///
/// [`TimerHandle::INVALID`] is the failure sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(u32);

impl TimerHandle {
    /// Sentinel returned when a timer could not be created
    pub const INVALID: TimerHandle = TimerHandle(u32::MAX);

    /// Wrap a driver-assigned timer id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Driver-assigned id
    pub fn id(self) -> u32 {
        self.0
    }

    /// Check whether this handle refers to a live timer
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Periodic callback service
///
/// There is no cancellation: a registered timer runs for the lifetime of
/// the process.
pub trait PeriodicTimer {
    /// Invoke `callback` every `interval_ms` milliseconds
    ///
    /// Returns [`TimerHandle::INVALID`] if the timer could not be created.
    fn register_periodic(&mut self, callback: &'static dyn Notify, interval_ms: u32) -> TimerHandle;
}
