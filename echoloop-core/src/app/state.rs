//! Application states

/// Application states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplicationState {
    /// Initialized, welcome message not yet sent
    Init,
    /// Steady state: servicing receive completions and timer ticks
    ServiceTasks,
    /// Corrupted state. Never entered in normal operation; `tick()` ignores it.
    Unknown,
}

impl ApplicationState {
    /// Check if this is the steady state
    pub fn is_steady(&self) -> bool {
        matches!(self, ApplicationState::ServiceTasks)
    }

    /// State after one tick
    ///
    /// `init_complete` is the readiness guard for leaving `Init`.
    pub fn next(self, init_complete: bool) -> Self {
        match self {
            ApplicationState::Init if init_complete => ApplicationState::ServiceTasks,
            other => other,
        }
    }
}
