//! UART serial communication abstractions
//!
//! The receive side is armed, not polled: the application hands the driver a
//! sink and a length, and the driver reports completion through the
//! registered [`Notify`] callback once exactly that many bytes have landed.

use crate::Notify;

/// Reasons a driver's delivery into an [`RxSink`] can be refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeliveryError {
    /// No receive is outstanding; the application still owns the buffer
    NotArmed,
    /// More bytes than the armed length
    Overflow,
}

/// Landing zone for a completed receive
///
/// Implemented by the application's receive buffer. The driver calls
/// [`RxSink::deliver`] once per completed transfer, from interrupt context,
/// before invoking the receive callback.
pub trait RxSink: Sync {
    /// Copy a completed transfer into the sink
    ///
    /// On success ownership of the sink passes back to the application.
    fn deliver(&self, data: &[u8]) -> Result<(), DeliveryError>;
}

/// Callback-driven UART
///
/// Every method is non-blocking from the caller's point of view. `write` may
/// wait until the data is queued, never until it is on the wire.
pub trait SerialPort {
    /// Error type for transmit and receive requests
    type Error;

    /// Register the callback invoked once per completed receive
    fn register_receive_callback(&mut self, callback: &'static dyn Notify);

    /// Arm a receive of exactly `length` bytes into `sink`
    fn start_receive(&mut self, sink: &'static dyn RxSink, length: usize) -> Result<(), Self::Error>;

    /// Queue `data` for transmission
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}
