//! UART driver for RP2040
//!
//! Transmit goes straight into the buffered UART's ring buffer and returns
//! once queued. Receive is split: [`Rp2040Serial::start_receive`] posts a
//! request to [`serial_rx_task`], which reads exactly the requested length,
//! delivers it to the sink and then fires the registered callback.

use core::cell::Cell;

use defmt::*;
use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_io::Write;
use embedded_io_async::Read;
use heapless::Vec;

use echoloop_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use echoloop_hal::{Notify, RxSink, SerialPort};

/// Largest receive the task can stage
pub const MAX_RECEIVE_LEN: usize = 256;

/// UART driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SerialError {
    /// Peripheral reported an error
    Uart(uart::Error),
    /// Receive longer than [`MAX_RECEIVE_LEN`]
    TooLong,
}

#[derive(Clone, Copy)]
struct ReceiveRequest {
    sink: &'static dyn RxSink,
    length: usize,
}

/// Shared state between [`Rp2040Serial`] and [`serial_rx_task`]
pub struct SerialLink {
    request: Signal<CriticalSectionRawMutex, ReceiveRequest>,
    callback: Mutex<CriticalSectionRawMutex, Cell<Option<&'static dyn Notify>>>,
}

impl SerialLink {
    pub const fn new() -> Self {
        Self {
            request: Signal::new(),
            callback: Mutex::new(Cell::new(None)),
        }
    }

    fn callback(&self) -> Option<&'static dyn Notify> {
        self.callback.lock(|cb| cb.get())
    }
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback-driven UART on top of embassy-rp's buffered UART
pub struct Rp2040Serial {
    tx: BufferedUartTx,
    link: &'static SerialLink,
}

impl Rp2040Serial {
    /// Create the driver. [`serial_rx_task`] must be spawned with the same
    /// link and the RX half of the UART.
    pub fn new(tx: BufferedUartTx, link: &'static SerialLink) -> Self {
        Self { tx, link }
    }
}

impl SerialPort for Rp2040Serial {
    type Error = SerialError;

    fn register_receive_callback(&mut self, callback: &'static dyn Notify) {
        self.link.callback.lock(|cb| cb.set(Some(callback)));
    }

    fn start_receive(&mut self, sink: &'static dyn RxSink, length: usize) -> Result<(), SerialError> {
        if length > MAX_RECEIVE_LEN {
            return Err(SerialError::TooLong);
        }
        self.link.request.signal(ReceiveRequest { sink, length });
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.tx.write_all(data).map_err(SerialError::Uart)
    }
}

/// Serial receive task - completes armed receives
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx, link: &'static SerialLink) {
    info!("Serial RX task started");

    loop {
        let request = link.request.wait().await;

        let mut staging: Vec<u8, MAX_RECEIVE_LEN> = Vec::new();
        if staging.resize_default(request.length).is_err() {
            warn!("Receive of {} bytes exceeds staging buffer", request.length);
            continue;
        }

        // No timeout: wait as long as it takes for the full length
        while rx.read_exact(&mut staging).await.is_err() {
            warn!("UART receive error, restarting transfer");
        }
        trace!("RX: {} bytes", staging.len());

        if let Err(e) = request.sink.deliver(&staging) {
            warn!("Receive sink rejected transfer: {:?}", e);
            continue;
        }

        if let Some(callback) = link.callback() {
            callback.notify();
        }
    }
}

/// Convert the shared line settings to embassy-rp's UART config
pub fn to_embassy_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Five => uart::DataBits::DataBits5,
        DataBits::Six => uart::DataBits::DataBits6,
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}
