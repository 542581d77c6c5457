//! Operation-scoped re-entrancy lock.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::VestingError;

/// Exclusive "operation in flight" flag. Clones share the same flag, so an
/// asset port holding a clone observes the lock its caller took.
#[derive(Clone, Debug, Default)]
pub struct ReentrancyLock {
    held: Rc<Cell<bool>>,
}

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> Result<LockGuard, VestingError> {
        if self.held.replace(true) {
            return Err(VestingError::Reentrancy);
        }
        Ok(LockGuard {
            held: Rc::clone(&self.held),
        })
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }
}

/// Clears the lock when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct LockGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}
