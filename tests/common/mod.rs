//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use paramstore::{
    ControlBlock, DeviceError, MemoryBackend, MemoryDevice, ParameterManager, StorageLocation,
};
use parking_lot::Mutex;
use std::sync::{Arc, Once};
use std::time::Duration;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Manager initialized for `capacity` parameters with a short lock timeout.
pub fn ready_manager(capacity: usize) -> ParameterManager {
    init_tracing();
    let manager = ParameterManager::with_timeout(Duration::from_millis(50));
    manager.init(capacity);
    manager
}

/// Fully configured control block.
pub fn block(size: usize, address: u32, location: StorageLocation) -> ControlBlock {
    ControlBlock::builder()
        .size(size)
        .address(address)
        .storage(location)
        .build()
}

// ============================================================================
// RecordingDevice - backend that logs every call
// ============================================================================

/// One call observed by a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Read { address: u32, len: usize },
    Write { address: u32, data: Vec<u8> },
}

/// Memory-backed device that records the calls it receives.
pub struct RecordingDevice {
    memory: MemoryBackend,
    calls: Mutex<Vec<DeviceCall>>,
}

impl RecordingDevice {
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            memory: MemoryBackend::volatile(capacity),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().clone()
    }

    pub fn memory(&self) -> &MemoryBackend {
        &self.memory
    }
}

impl MemoryDevice for RecordingDevice {
    fn read(&self, address: u32, buf: &mut [u8]) -> Result<(), DeviceError> {
        self.calls.lock().push(DeviceCall::Read {
            address,
            len: buf.len(),
        });
        self.memory.read(address, buf)
    }

    fn write(&self, address: u32, data: &[u8]) -> Result<(), DeviceError> {
        self.calls.lock().push(DeviceCall::Write {
            address,
            data: data.to_vec(),
        });
        self.memory.write(address, data)
    }
}
