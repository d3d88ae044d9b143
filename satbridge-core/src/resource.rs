//! Cooperative cancellation and memory checkpoints.
//!
//! Long-running translations own a [`CancelHandle`]. At the start of each
//! call they install a fresh cancellation flag into the handle's slot with
//! [`CancelHandle::activate`]; the returned [`ActiveCall`] guard clears the
//! slot again when dropped, on success, error or unwind alike. Other threads
//! holding a clone of the handle can request cancellation of whatever call is
//! in flight. Requests made while no call is active are dropped.
//!
//! Inside its main loop the call polls a [`Checkpoint`], which reports
//! cancellation first and the memory cap second.

use crate::error::{BridgeError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Convert a limit in megabytes to bytes, saturating.
#[must_use]
pub const fn megabytes_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(1024 * 1024)
}

/// Externally settable cancellation switch for the in-flight call.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    slot: Arc<Mutex<Option<Arc<AtomicBool>>>>,
}

impl CancelHandle {
    /// Create a handle with no active call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the cancellation flag of the active call, if any.
    pub fn set_cancel(&self, cancel: bool) {
        if let Some(flag) = self.slot.lock().as_ref() {
            flag.store(cancel, Ordering::Relaxed);
        }
    }

    /// Request cancellation of the active call, if any.
    pub fn cancel(&self) {
        self.set_cancel(true);
    }

    /// Check whether a call is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Install a fresh flag for a new call.
    #[must_use]
    pub fn activate(&self) -> ActiveCall {
        let flag = Arc::new(AtomicBool::new(false));
        *self.slot.lock() = Some(Arc::clone(&flag));
        ActiveCall {
            slot: Arc::clone(&self.slot),
            flag,
        }
    }
}

/// Scope guard for one in-flight call. Clears the handle's slot on drop.
#[derive(Debug)]
pub struct ActiveCall {
    slot: Arc<Mutex<Option<Arc<AtomicBool>>>>,
    flag: Arc<AtomicBool>,
}

impl ActiveCall {
    /// Check whether cancellation was requested for this call.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Build a checkpoint for this call with an optional memory cap in bytes.
    #[must_use]
    pub fn checkpoint(&self, max_memory: Option<u64>) -> Checkpoint {
        Checkpoint {
            flag: Arc::clone(&self.flag),
            max_memory,
            polls: 0,
        }
    }
}

impl Drop for ActiveCall {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        // a newer call may already own the slot
        if slot.as_ref().is_some_and(|f| Arc::ptr_eq(f, &self.flag)) {
            *slot = None;
        }
    }
}

/// Cooperative poll point.
#[derive(Debug)]
pub struct Checkpoint {
    flag: Arc<AtomicBool>,
    max_memory: Option<u64>,
    polls: u64,
}

impl Checkpoint {
    /// Poll cancellation, then compare `used_bytes` against the cap.
    pub fn check(&mut self, used_bytes: u64) -> Result<()> {
        self.polls += 1;
        if self.flag.load(Ordering::Relaxed) {
            debug!(polls = self.polls, "cancellation observed");
            return Err(BridgeError::Cancelled);
        }
        match self.max_memory {
            Some(limit) if used_bytes > limit => {
                debug!(used = used_bytes, limit, polls = self.polls, "memory limit crossed");
                Err(BridgeError::ResourceExceeded {
                    used: used_bytes,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }

    /// Number of polls performed so far.
    #[must_use]
    pub fn polls(&self) -> u64 {
        self.polls
    }
}
