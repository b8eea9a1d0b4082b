//! Application loop task
//!
//! Acts as the external scheduler for the state machine: initializes it
//! once, then ticks it at a fixed rate forever.

use defmt::*;
use embassy_time::{Duration, Ticker};

use echoloop_core::App;
use echoloop_hal_rp2040::timer::Rp2040Timer;
use echoloop_hal_rp2040::uart::Rp2040Serial;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// Ticks between heartbeat log lines (one minute)
const HEARTBEAT_TICKS: u32 = 60_000;

/// The application as wired on this board
pub type FirmwareApp = App<Rp2040Serial, Rp2040Timer>;

/// App task - runs `initialize()` once and `tick()` forever
#[embassy_executor::task]
pub async fn app_task(mut app: FirmwareApp) {
    info!("App task started");

    app.initialize();

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut ticks: u32 = 0;

    loop {
        app.tick();

        ticks = ticks.wrapping_add(1);
        if ticks % HEARTBEAT_TICKS == 0 {
            trace!("Main loop heartbeat, state {:?}", app.state());
        }

        ticker.next().await;
    }
}
