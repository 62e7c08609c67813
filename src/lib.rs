//! Paramstore - in-process parameter registry
//!
//! Producers and consumers of named values share them through a
//! [`ParameterManager`] without knowing where the bytes physically live.
//! Each parameter is described by a [`ControlBlock`] (size, address, storage
//! location, optional refresh callback); the manager resolves the block to a
//! bound [`MemoryDevice`] at access time.
//!
//! # Quick Start
//!
//! ```
//! use paramstore::{ControlBlock, MemoryBackend, ParameterManager, StorageLocation};
//! use std::sync::Arc;
//!
//! let manager = ParameterManager::new();
//! manager.init(16);
//!
//! let block = ControlBlock::builder()
//!     .size(4)
//!     .address(0x100)
//!     .storage(StorageLocation::ExternalFlash0)
//!     .build();
//! manager.register_parameter("temp", block)?;
//! manager.register_memory_driver(
//!     StorageLocation::ExternalFlash0,
//!     Arc::new(MemoryBackend::erased(4096)),
//! )?;
//!
//! manager.write("temp", &[1, 2, 3, 4])?;
//! let mut buf = [0u8; 4];
//! manager.read("temp", &mut buf)?;
//! assert_eq!(buf, [1, 2, 3, 4]);
//! # Ok::<(), paramstore::ParamError>(())
//! ```
//!
//! # Architecture
//!
//! - `paramstore-core`: locations, config-word codec, control blocks, backend contract, errors
//! - `paramstore-storage`: registry, driver table, in-memory backend
//! - `paramstore-concurrency`: bounded-timeout lock
//! - `paramstore-engine`: the manager and its configuration

pub use paramstore_concurrency::{TimedMutex, DEFAULT_LOCK_TIMEOUT};
pub use paramstore_core::codec;
pub use paramstore_core::{
    ControlBlock, ControlBlockBuilder, DeviceError, DeviceHandle, MemoryDevice, MemorySpecs,
    ParamError, Result, Slot, StorageLocation, UpdateCallback, LOCATION_COUNT,
};
pub use paramstore_engine::{ManagerConfig, MemoryConfig, ParameterManager, CONFIG_FILE_NAME};
pub use paramstore_storage::{DriverTable, MemoryBackend, ParameterRegistry, ERASED_BYTE};
