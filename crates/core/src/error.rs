//! Error types for the parameter manager
//!
//! Every public operation reports failure through [`ParamError`]. There is no
//! partial success: an operation that returns an error has left the registry
//! and driver table unchanged.

use crate::device::DeviceError;
use crate::location::StorageLocation;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for parameter manager operations
pub type Result<T> = std::result::Result<T, ParamError>;

/// Error types for the parameter manager
#[derive(Debug, Error)]
pub enum ParamError {
    /// Operation attempted before `init`
    #[error("Parameter manager is not initialized")]
    NotInitialized,

    /// The manager lock could not be acquired within the configured timeout
    #[error("Timed out after {timeout:?} waiting for the parameter manager lock")]
    LockTimeout {
        /// How long the caller waited
        timeout: Duration,
    },

    /// No control block is registered under the key
    #[error("Parameter not registered: {0}")]
    KeyNotFound(String),

    /// The caller's buffer cannot hold the parameter
    #[error("Buffer too small: parameter needs {required} bytes, buffer holds {provided}")]
    BufferTooSmall {
        /// Size recorded in the control block
        required: usize,
        /// Length of the caller's buffer
        provided: usize,
    },

    /// The parameter's control block lacks a size, address or storage location
    #[error("Parameter control block is not fully configured: {0}")]
    Unconfigured(String),

    /// No backend is bound to the parameter's storage location
    #[error("No memory driver bound for {0}")]
    NoDriverBound(StorageLocation),

    /// The "none" sentinel or a slot index >= 8 was passed to a slot registration
    #[error("Invalid storage slot: {}", slot_name(.0))]
    InvalidStorageSlot(Option<u8>),

    /// The backend reported a failed read or write
    #[error("Memory driver for {location} failed: {source}")]
    DriverIo {
        /// Location whose backend failed
        location: StorageLocation,
        /// Backend's own error
        #[source]
        source: DeviceError,
    },

    /// `update` was called on a parameter without a refresh callback
    #[error("Parameter has no update callback: {0}")]
    NoUpdateCallback(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

fn slot_name(slot: &Option<u8>) -> String {
    match slot {
        Some(index) => index.to_string(),
        None => "none".to_string(),
    }
}

impl ParamError {
    /// True for failures a caller may reasonably retry as-is
    pub fn is_transient(&self) -> bool {
        matches!(self, ParamError::LockTimeout { .. } | ParamError::DriverIo { .. })
    }
}
