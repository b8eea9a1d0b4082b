//! Receive buffer with explicit driver/application ownership
//!
//! Ownership alternates between the driver (a receive is armed and the
//! driver may write) and the application (a transfer completed and the task
//! loop may read). The tag makes the handoff checkable: the driver cannot
//! deliver into a buffer the application owns, and the application cannot
//! read or re-arm a buffer the driver owns.

use core::cell::RefCell;

use echoloop_hal::{DeliveryError, RxSink};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::EchoMode;

/// Who may touch the buffer contents right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferOwner {
    /// Task loop may read; no receive outstanding
    Application,
    /// Receive armed; driver may write
    Driver,
}

/// Ownership violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Read attempted while the driver owns the buffer
    NotOwned,
    /// Arm attempted while a receive is already outstanding
    AlreadyArmed,
    /// Arm length exceeds the buffer capacity
    InvalidLength,
}

struct Slot<const N: usize> {
    bytes: [u8; N],
    owner: BufferOwner,
    armed_len: usize,
    received_len: usize,
}

/// Fixed-size receive buffer reused for every transfer
pub struct ReceiveBuffer<const N: usize> {
    slot: Mutex<CriticalSectionRawMutex, RefCell<Slot<N>>>,
}

impl<const N: usize> ReceiveBuffer<N> {
    /// Zeroed buffer owned by the application
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(Slot {
                bytes: [0; N],
                owner: BufferOwner::Application,
                armed_len: 0,
                received_len: 0,
            })),
        }
    }

    /// Buffer capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current owner
    pub fn owner(&self) -> BufferOwner {
        self.slot.lock(|slot| slot.borrow().owner)
    }

    /// Length of the last completed transfer
    pub fn received_len(&self) -> usize {
        self.slot.lock(|slot| slot.borrow().received_len)
    }

    /// Hand the buffer to the driver for a receive of `length` bytes
    pub fn arm(&self, length: usize) -> Result<(), BufferError> {
        if length > N {
            return Err(BufferError::InvalidLength);
        }
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.owner == BufferOwner::Driver {
                return Err(BufferError::AlreadyArmed);
            }
            slot.owner = BufferOwner::Driver;
            slot.armed_len = length;
            Ok(())
        })
    }

    /// Take the buffer back after the driver refused the receive request
    pub fn disarm(&self) {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            slot.owner = BufferOwner::Application;
            slot.armed_len = 0;
        })
    }

    /// Copy the contents out for transmission
    ///
    /// Returns the number of bytes copied into `out`, which depends on
    /// `mode`. The copy happens inside the critical section so the caller
    /// can transmit without holding it.
    pub fn copy_out(&self, mode: EchoMode, out: &mut [u8; N]) -> Result<usize, BufferError> {
        self.slot.lock(|slot| {
            let slot = slot.borrow();
            if slot.owner != BufferOwner::Application {
                return Err(BufferError::NotOwned);
            }
            let len = match mode {
                EchoMode::FullBuffer => N,
                EchoMode::ReceivedOnly => slot.received_len,
            };
            out[..len].copy_from_slice(&slot.bytes[..len]);
            Ok(len)
        })
    }
}

impl<const N: usize> Default for ReceiveBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxSink for ReceiveBuffer<N> {
    fn deliver(&self, data: &[u8]) -> Result<(), DeliveryError> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.owner != BufferOwner::Driver {
                return Err(DeliveryError::NotArmed);
            }
            if data.len() > slot.armed_len {
                return Err(DeliveryError::Overflow);
            }
            slot.bytes[..data.len()].copy_from_slice(data);
            slot.received_len = data.len();
            slot.armed_len = 0;
            slot.owner = BufferOwner::Application;
            Ok(())
        })
    }
}
