//! Operation guard
//!
//! Serializes pool operations. A mutating operation holds the write side
//! for its whole duration, custody calls included; another thread waits its
//! turn. Re-entry from the thread already inside an operation (a custody
//! adapter calling back into the pool) fails with `Reentrant` instead of
//! deadlocking.
//!
//! Reads take the shared side, so they never observe an operation half
//! applied. A read from inside the running operation skips the lock.

use crate::error::LedgerError;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    op_lock: RwLock<()>,
    /// Thread currently inside a mutating operation
    holder: Mutex<Option<ThreadId>>,
}

/// Proof of entry; releases the guard on drop
#[must_use]
#[derive(Debug)]
pub struct Entered<'a> {
    guard: &'a ReentrancyGuard,
    _lock: RwLockWriteGuard<'a, ()>,
}

/// Shared access for reads; `None` inside the running operation
pub type Observed<'a> = Option<RwLockReadGuard<'a, ()>>;

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn holder(&self) -> Option<ThreadId> {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_holder(&self, holder: Option<ThreadId>) {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner) = holder;
    }

    fn held_by_current(&self) -> bool {
        self.holder() == Some(thread::current().id())
    }

    /// Wait for exclusive access.
    ///
    /// # Errors
    /// - `Reentrant` if this thread is already inside an operation
    pub fn enter(&self) -> Result<Entered<'_>, LedgerError> {
        if self.held_by_current() {
            return Err(LedgerError::Reentrant);
        }
        let lock = self.op_lock.write().unwrap_or_else(PoisonError::into_inner);
        self.set_holder(Some(thread::current().id()));
        Ok(Entered {
            guard: self,
            _lock: lock,
        })
    }

    /// Wait until no operation is in progress on another thread
    pub fn observe(&self) -> Observed<'_> {
        if self.held_by_current() {
            return None;
        }
        Some(self.op_lock.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_entered(&self) -> bool {
        self.holder().is_some()
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        // Runs before `_lock` is released
        self.guard.set_holder(None);
    }
}
