//! Protocol constants and application configuration
//!
//! Everything here is fixed when the application is constructed. There is
//! no runtime reconfiguration.

/// Receive buffer capacity in bytes
pub const BUFFER_SIZE: usize = 100;

/// Periodic message interval in milliseconds
pub const PERIODIC_INTERVAL_MS: u32 = 1000;

/// Sent once on the first tick
pub const WELCOME_MESSAGE: &[u8] = b"UART Communication Initialized.\r\n";

/// Sent on every timer tick
pub const PERIODIC_MESSAGE: &[u8] = b"Periodic UART Message.\r\n";

/// Sent during initialization if the timer service refuses the timer
pub const TIMER_FAILURE_MESSAGE: &[u8] = b"Failed to create timer.\r\n";

/// How much of the receive buffer an echo sends back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoMode {
    /// Always the whole buffer, including bytes left over from earlier
    /// transfers. Matches deployed devices.
    #[default]
    FullBuffer,
    /// Only the bytes delivered by the last completed receive
    ReceivedOnly,
}

/// Application configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Interval requested from the timer service
    pub periodic_interval_ms: u32,
    /// Welcome message, sent on the `Init -> ServiceTasks` transition
    pub welcome_message: &'static [u8],
    /// Message sent for each timer tick
    pub periodic_message: &'static [u8],
    /// Diagnostic sent when timer creation fails
    pub timer_failure_message: &'static [u8],
    /// Echo length policy
    pub echo_mode: EchoMode,
}

impl AppConfig {
    /// Configuration with the fixed protocol constants
    pub const fn new() -> Self {
        Self {
            periodic_interval_ms: PERIODIC_INTERVAL_MS,
            welcome_message: WELCOME_MESSAGE,
            periodic_message: PERIODIC_MESSAGE,
            timer_failure_message: TIMER_FAILURE_MESSAGE,
            echo_mode: EchoMode::FullBuffer,
        }
    }

    /// Same configuration with a different echo policy
    pub const fn with_echo_mode(mut self, echo_mode: EchoMode) -> Self {
        self.echo_mode = echo_mode;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
