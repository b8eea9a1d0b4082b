//! echoloop - UART echo firmware
//!
//! Main firmware binary for RP2040-based boards. Brings up UART0
//! (GPIO0 TX, GPIO1 RX) and the periodic timer service, then hands both to
//! the application loop, which echoes every received frame and emits a
//! periodic message once a second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use echoloop_core::{App, AppConfig, Context};
use echoloop_hal::UartConfig;
use echoloop_hal_rp2040::timer::Rp2040Timer;
use echoloop_hal_rp2040::uart::{serial_rx_task, to_embassy_config, Rp2040Serial, SerialLink};

mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Flags and receive buffer shared with driver callbacks
static CONTEXT: Context = Context::new();

/// Receive requests and callback registration for the RX task
static SERIAL_LINK: SerialLink = SerialLink::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("echoloop firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let uart_config = to_embassy_config(&UartConfig::default()); // 115200 8N1

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized");

    let serial = Rp2040Serial::new(tx, &SERIAL_LINK);
    let timer = Rp2040Timer::new(spawner);
    let app = App::new(serial, timer, &CONTEXT, AppConfig::default());

    // Spawn tasks
    spawner.spawn(serial_rx_task(rx, &SERIAL_LINK)).unwrap();
    spawner.spawn(tasks::app_task(app)).unwrap();

    info!("All tasks spawned, firmware running");
}
