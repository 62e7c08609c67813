//! Concurrency layer for the parameter manager
//!
//! Provides the bounded-timeout exclusive lock that guards the registry and
//! driver table. Holders keep it only for metadata work; backend I/O happens
//! after release.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lock;

pub use lock::{TimedMutex, DEFAULT_LOCK_TIMEOUT};
pub use parking_lot::MutexGuard;
