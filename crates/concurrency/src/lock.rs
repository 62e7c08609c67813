//! Bounded-timeout exclusive lock
//!
//! Wraps `parking_lot::Mutex` so that every acquisition attempt gives up after
//! a configured wait instead of blocking indefinitely. Release is the guard's
//! drop. A timeout is an ordinary, recoverable failure: the caller gets
//! [`ParamError::LockTimeout`] and decides whether to retry.

use paramstore_core::{ParamError, Result};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Default acquisition timeout
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(50);

/// Mutex whose acquisition fails after a bounded wait
pub struct TimedMutex<T> {
    inner: Mutex<T>,
    timeout: Duration,
}

impl<T> TimedMutex<T> {
    /// Create a lock around `value` with the given acquisition timeout
    pub fn new(value: T, timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(value),
            timeout,
        }
    }

    /// Configured acquisition timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Acquire within the configured timeout
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` if the lock is still held when the timeout elapses.
    pub fn acquire(&self) -> Result<MutexGuard<'_, T>> {
        self.acquire_for(self.timeout)
    }

    /// Acquire within an explicit timeout
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` if the lock is still held when `timeout` elapses.
    pub fn acquire_for(&self, timeout: Duration) -> Result<MutexGuard<'_, T>> {
        match self.inner.try_lock_for(timeout) {
            Some(guard) => Ok(guard),
            None => {
                warn!(target: "paramstore::lock", ?timeout, "Lock acquisition timed out");
                Err(ParamError::LockTimeout { timeout })
            }
        }
    }

    /// Acquire without a deadline
    ///
    /// For operations that are defined to always succeed.
    pub fn acquire_blocking(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// True if some caller currently holds the lock
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Consume the lock, returning the protected value
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default> Default for TimedMutex<T> {
    fn default() -> Self {
        Self::new(T::default(), DEFAULT_LOCK_TIMEOUT)
    }
}

impl<T> fmt::Debug for TimedMutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedMutex")
            .field("timeout", &self.timeout)
            .field("locked", &self.is_locked())
            .finish()
    }
}
