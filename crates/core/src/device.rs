//! Storage backend contract
//!
//! A memory device moves bytes to and from a physical medium. The manager
//! never owns a device exclusively: handles are shared as
//! [`DeviceHandle`]s and may be held by several managers or by whoever
//! configured the hardware.
//!
//! Thread safety: all methods take `&self` and must be safe to call
//! concurrently (requires Send + Sync). Devices that need serialized access
//! to their bus do that internally.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Shared, reference-counted handle to a backend
pub type DeviceHandle = Arc<dyn MemoryDevice>;

/// Failure reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The byte range falls outside the device
    #[error("address range {address:#x}+{len} exceeds device capacity {capacity}")]
    OutOfBounds {
        /// Start of the requested range
        address: u32,
        /// Requested length in bytes
        len: usize,
        /// Device capacity in bytes
        capacity: usize,
    },

    /// The device could not complete the transfer
    #[error("device operation failed: {0}")]
    Failed(String),
}

/// Byte-range read/write access to a storage medium
pub trait MemoryDevice: Send + Sync {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or the transfer fails.
    fn read(&self, address: u32, buf: &mut [u8]) -> Result<(), DeviceError>;

    /// Write all of `data` starting at `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or the transfer fails.
    fn write(&self, address: u32, data: &[u8]) -> Result<(), DeviceError>;
}

/// Capacity and partition metadata for one storage location
///
/// Attached per location alongside (or instead of) a driver. The manager
/// stores and returns it but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySpecs {
    /// First address of the region reserved for parameters
    #[serde(default)]
    pub base_address: u32,
    /// Size of the region in bytes
    pub capacity: u32,
    /// Program/erase granularity in bytes (1 for byte-addressable RAM)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    1
}

impl MemorySpecs {
    /// Describe a byte-addressable region
    pub fn new(base_address: u32, capacity: u32) -> Self {
        Self {
            base_address,
            capacity,
            page_size: default_page_size(),
        }
    }

    /// Set the program/erase granularity
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// One past the last address of the region
    pub fn end_address(&self) -> u64 {
        self.base_address as u64 + self.capacity as u64
    }
}
