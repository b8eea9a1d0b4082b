//! Host doubles for the peripheral driver interface

use std::cell::RefCell;
use std::rc::Rc;

use echoloop_hal::{DeliveryError, Notify, PeriodicTimer, RxSink, SerialPort, TimerHandle};

use crate::app::Context;

/// Driver calls observed by [`MockSerial`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write(Vec<u8>),
    StartReceive(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Default)]
struct SerialState {
    callback: Option<&'static dyn Notify>,
    armed: Option<(&'static dyn RxSink, usize)>,
    ops: Vec<Op>,
    fail_writes: bool,
    fail_receives: bool,
}

/// Recording UART. Clones share state, so a test keeps one clone while the
/// app owns another.
#[derive(Clone, Default)]
pub struct MockSerial(Rc<RefCell<SerialState>>);

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded operations
    pub fn take_ops(&self) -> Vec<Op> {
        core::mem::take(&mut self.0.borrow_mut().ops)
    }

    pub fn is_armed(&self) -> bool {
        self.0.borrow().armed.is_some()
    }

    pub fn has_callback(&self) -> bool {
        self.0.borrow().callback.is_some()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn fail_receives(&self, fail: bool) {
        self.0.borrow_mut().fail_receives = fail;
    }

    /// Complete the outstanding receive as the interrupt handler would
    pub fn complete_receive(&self, data: &[u8]) -> Result<(), DeliveryError> {
        let (armed, callback) = {
            let mut state = self.0.borrow_mut();
            (state.armed.take(), state.callback)
        };
        let (sink, _len) = armed.ok_or(DeliveryError::NotArmed)?;
        sink.deliver(data)?;
        if let Some(callback) = callback {
            callback.notify();
        }
        Ok(())
    }
}

impl SerialPort for MockSerial {
    type Error = MockError;

    fn register_receive_callback(&mut self, callback: &'static dyn Notify) {
        self.0.borrow_mut().callback = Some(callback);
    }

    fn start_receive(&mut self, sink: &'static dyn RxSink, length: usize) -> Result<(), MockError> {
        let mut state = self.0.borrow_mut();
        state.ops.push(Op::StartReceive(length));
        if state.fail_receives {
            return Err(MockError);
        }
        state.armed = Some((sink, length));
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), MockError> {
        let mut state = self.0.borrow_mut();
        state.ops.push(Op::Write(data.to_vec()));
        if state.fail_writes {
            return Err(MockError);
        }
        Ok(())
    }
}

#[derive(Default)]
struct TimerState {
    callback: Option<&'static dyn Notify>,
    interval_ms: Option<u32>,
    refuse: bool,
}

/// Timer service that fires only when told to
#[derive(Clone, Default)]
pub struct MockTimer(Rc<RefCell<TimerState>>);

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer service that hands out the invalid handle
    pub fn refusing() -> Self {
        let timer = Self::default();
        timer.0.borrow_mut().refuse = true;
        timer
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.0.borrow().interval_ms
    }

    /// Fire one tick as the timer interrupt would
    pub fn fire(&self) {
        let callback = self.0.borrow().callback;
        if let Some(callback) = callback {
            callback.notify();
        }
    }
}

impl PeriodicTimer for MockTimer {
    fn register_periodic(&mut self, callback: &'static dyn Notify, interval_ms: u32) -> TimerHandle {
        let mut state = self.0.borrow_mut();
        if state.refuse {
            return TimerHandle::INVALID;
        }
        state.callback = Some(callback);
        state.interval_ms = Some(interval_ms);
        TimerHandle::new(0)
    }
}

/// Shared context with a static lifetime for one test
pub fn leak_context<const N: usize>() -> &'static Context<N> {
    Box::leak(Box::new(Context::new()))
}
