//! Application context and state machine
//!
//! [`Context`] holds everything interrupt context may touch and lives in a
//! `static`. [`App`] owns the state variable and the drivers, and is driven
//! by an external scheduler: `initialize()` once, then `tick()` forever.
//! `tick()` never blocks; every driver call it makes is fire-and-forget.

use echoloop_hal::{PeriodicTimer, SerialPort, TimerHandle};

use super::state::ApplicationState;
use crate::buffer::ReceiveBuffer;
use crate::config::{AppConfig, BUFFER_SIZE};
use crate::flags::EventFlags;

/// State shared between driver callbacks and the task loop
pub struct Context<const N: usize = BUFFER_SIZE> {
    /// Receive-complete and timer flags
    pub flags: EventFlags,
    /// Single receive buffer, reused for every transfer
    pub rx: ReceiveBuffer<N>,
}

impl<const N: usize> Context<N> {
    /// Cleared flags and an application-owned buffer
    pub const fn new() -> Self {
        Self {
            flags: EventFlags::new(),
            rx: ReceiveBuffer::new(),
        }
    }
}

impl<const N: usize> Default for Context<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The application loop
pub struct App<S, T, const N: usize = BUFFER_SIZE>
where
    S: SerialPort,
    T: PeriodicTimer,
{
    state: ApplicationState,
    serial: S,
    timer: T,
    ctx: &'static Context<N>,
    config: AppConfig,
    timer_handle: TimerHandle,
}

impl<S, T, const N: usize> App<S, T, N>
where
    S: SerialPort,
    T: PeriodicTimer,
{
    /// Create the application. Nothing touches the drivers until
    /// [`App::initialize`].
    pub fn new(serial: S, timer: T, ctx: &'static Context<N>, config: AppConfig) -> Self {
        Self {
            state: ApplicationState::Init,
            serial,
            timer,
            ctx,
            config,
            timer_handle: TimerHandle::INVALID,
        }
    }

    /// Current state
    pub fn state(&self) -> ApplicationState {
        self.state
    }

    /// Handle returned by the timer service during initialization
    pub fn timer_handle(&self) -> TimerHandle {
        self.timer_handle
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register callbacks, arm the first receive and start the periodic timer
    ///
    /// Timer creation failure is reported over the UART and otherwise
    /// ignored; the application runs without periodic messages.
    pub fn initialize(&mut self) {
        let ctx = self.ctx;
        self.state = ApplicationState::Init;

        self.serial.register_receive_callback(ctx.flags.received_callback());
        self.arm_receive();

        self.timer_handle = self
            .timer
            .register_periodic(ctx.flags.periodic_callback(), self.config.periodic_interval_ms);

        if self.timer_handle.is_valid() {
            info!(
                "Periodic timer {} armed every {} ms",
                self.timer_handle.id(),
                self.config.periodic_interval_ms
            );
        } else {
            warn!("Failed to create periodic timer");
            self.send(self.config.timer_failure_message);
        }
    }

    /// Advance the state machine by one step
    pub fn tick(&mut self) {
        match self.state {
            ApplicationState::Init => {
                // Initialization is synchronous, so the readiness guard holds
                // on the first tick.
                let init_complete = true;
                if init_complete {
                    self.send(self.config.welcome_message);
                    self.state = self.state.next(init_complete);
                    info!("State: Init -> ServiceTasks");
                }
            }
            ApplicationState::ServiceTasks => {
                if self.ctx.flags.take_received() {
                    self.echo();
                }
                if self.ctx.flags.take_periodic() {
                    trace!("Periodic message");
                    self.send(self.config.periodic_message);
                }
            }
            ApplicationState::Unknown => {}
        }
    }

    /// Send the receive buffer back, then hand it to the driver again
    fn echo(&mut self) {
        let mut frame = [0u8; N];
        match self.ctx.rx.copy_out(self.config.echo_mode, &mut frame) {
            Ok(len) => {
                debug!("Echo {} bytes", len);
                self.send(&frame[..len]);
            }
            Err(e) => {
                warn!("Receive flag set but buffer unavailable: {:?}", e);
            }
        }
        self.arm_receive();
    }

    fn arm_receive(&mut self) {
        let ctx = self.ctx;
        if let Err(e) = ctx.rx.arm(N) {
            warn!("Cannot arm receive: {:?}", e);
            return;
        }
        if self.serial.start_receive(&ctx.rx, N).is_err() {
            warn!("Driver refused receive of {} bytes", N);
            ctx.rx.disarm();
        }
    }

    fn send(&mut self, data: &[u8]) {
        if self.serial.write(data).is_err() {
            warn!("UART write of {} bytes failed", data.len());
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: ApplicationState) {
        self.state = state;
    }
}
