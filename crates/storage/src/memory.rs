//! In-memory storage backend
//!
//! A byte array behind a lock, usable as the driver for an internal SRAM
//! location or as a stand-in for any device in tests. Supports:
//! - Volatile (zero-filled) or erased (0xFF-filled) initial contents
//! - Bounds checking against a fixed capacity
//! - One-shot fault injection on the next read or write
//! - Read/write counters for verifying delegation
//!
//! # Example
//!
//! ```
//! use paramstore_core::MemoryDevice;
//! use paramstore_storage::MemoryBackend;
//!
//! let device = MemoryBackend::erased(256);
//! device.write(0x10, &[1, 2, 3, 4]).unwrap();
//!
//! let mut buf = [0u8; 4];
//! device.read(0x10, &mut buf).unwrap();
//! assert_eq!(buf, [1, 2, 3, 4]);
//! ```

use paramstore_core::{DeviceError, MemoryDevice};
use parking_lot::Mutex;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Fill value for erased flash-like media
pub const ERASED_BYTE: u8 = 0xFF;

/// RAM-backed memory device
pub struct MemoryBackend {
    cells: Mutex<Vec<u8>>,
    fail_read: AtomicBool,
    fail_write: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryBackend {
    /// Device of `capacity` bytes, zero-filled
    pub fn volatile(capacity: usize) -> Self {
        Self::filled(capacity, 0)
    }

    /// Device of `capacity` bytes in the erased (0xFF) state
    pub fn erased(capacity: usize) -> Self {
        Self::filled(capacity, ERASED_BYTE)
    }

    /// Device of `capacity` bytes, every byte set to `fill`
    pub fn filled(capacity: usize, fill: u8) -> Self {
        Self {
            cells: Mutex::new(vec![fill; capacity]),
            fail_read: AtomicBool::new(false),
            fail_write: AtomicBool::new(false),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Device capacity in bytes
    pub fn capacity(&self) -> usize {
        self.cells.lock().len()
    }

    /// Copy of `len` bytes starting at `address` (for test verification)
    ///
    /// Returns `None` if the range falls outside the device.
    pub fn contents(&self, address: u32, len: usize) -> Option<Vec<u8>> {
        let cells = self.cells.lock();
        let range = checked_range(address, len, cells.len()).ok()?;
        Some(cells[range].to_vec())
    }

    /// Make the next read fail
    pub fn fail_next_read(&self) {
        self.fail_read.store(true, Ordering::SeqCst);
    }

    /// Make the next write fail
    pub fn fail_next_write(&self) {
        self.fail_write.store(true, Ordering::SeqCst);
    }

    /// Number of reads attempted
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of writes attempted
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

fn checked_range(address: u32, len: usize, capacity: usize) -> Result<Range<usize>, DeviceError> {
    let start = address as usize;
    match start.checked_add(len) {
        Some(end) if end <= capacity => Ok(start..end),
        _ => Err(DeviceError::OutOfBounds {
            address,
            len,
            capacity,
        }),
    }
}

impl MemoryDevice for MemoryBackend {
    fn read(&self, address: u32, buf: &mut [u8]) -> Result<(), DeviceError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if self.fail_read.swap(false, Ordering::SeqCst) {
            debug!(target: "paramstore::memory", address, len = buf.len(), "Injected read fault");
            return Err(DeviceError::Failed("injected read fault".to_string()));
        }

        let cells = self.cells.lock();
        let range = checked_range(address, buf.len(), cells.len())?;
        buf.copy_from_slice(&cells[range]);
        Ok(())
    }

    fn write(&self, address: u32, data: &[u8]) -> Result<(), DeviceError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        if self.fail_write.swap(false, Ordering::SeqCst) {
            debug!(target: "paramstore::memory", address, len = data.len(), "Injected write fault");
            return Err(DeviceError::Failed("injected write fault".to_string()));
        }

        let mut cells = self.cells.lock();
        let range = checked_range(address, data.len(), cells.len())?;
        cells[range].copy_from_slice(data);
        Ok(())
    }
}

impl fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("capacity", &self.capacity())
            .field("reads", &self.read_count())
            .field("writes", &self.write_count())
            .finish()
    }
}
