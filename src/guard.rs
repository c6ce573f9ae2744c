//! Single-flight guard for long-running operations.
//!
//! A [`ProcessingFlag`] is shared by everything that may start the operation.
//! [`ProcessingFlag::try_acquire`] hands out at most one [`ProcessingGuard`] at
//! a time; the flag is cleared when the guard is dropped, whether the
//! operation finished, failed or panicked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ProcessingFlag {
    busy: Arc<AtomicBool>,
}

impl ProcessingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an operation currently holds the guard.
    pub fn is_processing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Take the guard, or `None` if another operation holds it.
    pub fn try_acquire(&self) -> Option<ProcessingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Clears the owning [`ProcessingFlag`] on drop.
#[derive(Debug)]
pub struct ProcessingGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
