//! Periodic timer service for RP2040
//!
//! Each registered timer is a pooled embassy task driving a `Ticker`.
//! A full pool is reported as [`TimerHandle::INVALID`].

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};

use echoloop_hal::{Notify, PeriodicTimer, TimerHandle};

/// Number of periodic timers that can run at once
pub const MAX_TIMERS: usize = 2;

/// Timer service backed by the embassy time driver
pub struct Rp2040Timer {
    spawner: Spawner,
    next_id: u32,
}

impl Rp2040Timer {
    pub fn new(spawner: Spawner) -> Self {
        Self { spawner, next_id: 0 }
    }
}

impl PeriodicTimer for Rp2040Timer {
    fn register_periodic(&mut self, callback: &'static dyn Notify, interval_ms: u32) -> TimerHandle {
        if interval_ms == 0 {
            warn!("Refusing zero-length timer interval");
            return TimerHandle::INVALID;
        }

        match self.spawner.spawn(periodic_timer_task(callback, interval_ms)) {
            Ok(()) => {
                let handle = TimerHandle::new(self.next_id);
                self.next_id += 1;
                handle
            }
            Err(_) => {
                warn!("Timer pool exhausted ({} timers)", MAX_TIMERS);
                TimerHandle::INVALID
            }
        }
    }
}

/// Periodic timer task - fires the callback every interval
#[embassy_executor::task(pool_size = 2)]
async fn periodic_timer_task(callback: &'static dyn Notify, interval_ms: u32) {
    debug!("Periodic timer started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;
        callback.notify();
    }
}
