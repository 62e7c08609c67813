//! Parameter manager
//!
//! Orchestrates the registry and the driver table behind one bounded-timeout
//! lock. Callers register control blocks under string keys, bind storage
//! backends by location, and then read, write, or refresh parameters by key
//! without knowing where the bytes live.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --init--> Ready --init--> Ready (previous state discarded)
//! ```
//!
//! Every operation except `init` fails with `NotInitialized` before the first
//! `init`.
//!
//! ## Locking
//!
//! The lock covers metadata only. `read` and `write` resolve the control
//! block and clone the backend handle under the lock, release it, and then
//! perform I/O. `update` clones the callback under the lock and invokes it
//! after release. A driver rebound while I/O is in flight affects only later
//! calls; the in-flight call finishes against the handle it resolved.

use crate::config::ManagerConfig;
use paramstore_concurrency::{TimedMutex, DEFAULT_LOCK_TIMEOUT};
use paramstore_core::{
    ControlBlock, DeviceHandle, MemorySpecs, ParamError, Result, Slot, StorageLocation,
};
use paramstore_storage::{DriverTable, ParameterRegistry};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Default)]
struct Tables {
    registry: ParameterRegistry,
    drivers: DriverTable,
}

/// Everything `read`/`write` need, captured under the lock
struct Route {
    location: StorageLocation,
    address: u32,
    size: usize,
    driver: DeviceHandle,
}

/// Registry of named parameters and their storage backends
///
/// Safe to share between threads (`Arc<ParameterManager>`); every method
/// takes `&self`.
pub struct ParameterManager {
    ready: AtomicBool,
    tables: TimedMutex<Tables>,
}

impl ParameterManager {
    /// Create an uninitialized manager with the default lock timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an uninitialized manager with a custom lock timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            ready: AtomicBool::new(false),
            tables: TimedMutex::new(Tables::default(), timeout),
        }
    }

    /// Create an uninitialized manager using the config's lock timeout
    pub fn with_config(config: &ManagerConfig) -> Self {
        Self::with_timeout(config.lock_timeout())
    }

    /// Lock acquisition timeout
    pub fn lock_timeout(&self) -> Duration {
        self.tables.timeout()
    }

    /// True once `init` has run
    pub fn is_initialized(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Reset to an empty, ready state
    ///
    /// Pre-sizes the registry for `capacity` parameters and empties the
    /// driver table. Destructive: all registrations and bindings made before
    /// are discarded. Waits for the lock without a timeout, so it always
    /// succeeds.
    pub fn init(&self, capacity: usize) {
        self.reset(capacity, &[]);
    }

    /// `init` with the config's capacity, then attach its memory descriptors
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config fails validation; the manager is left
    /// untouched in that case.
    pub fn init_from_config(&self, config: &ManagerConfig) -> Result<()> {
        config.validate()?;
        let specs: Vec<(StorageLocation, MemorySpecs)> = config
            .memory
            .iter()
            .map(|entry| (entry.location, entry.specs))
            .collect();
        self.reset(config.capacity, &specs);
        Ok(())
    }

    fn reset(&self, capacity: usize, specs: &[(StorageLocation, MemorySpecs)]) {
        let mut tables = self.tables.acquire_blocking();
        tables.registry = ParameterRegistry::with_capacity(capacity);
        tables.drivers = DriverTable::new();
        for &(location, descriptor) in specs {
            tables.drivers.set_specs(location, descriptor);
        }
        self.ready.store(true, Ordering::Release);
        info!(
            target: "paramstore::manager",
            capacity,
            descriptors = specs.len(),
            "Parameter manager initialized"
        );
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(ParamError::NotInitialized)
        }
    }

    /// Register `block` under `key`, replacing any existing registration
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn register_parameter(&self, key: impl Into<String>, block: ControlBlock) -> Result<()> {
        self.ensure_ready()?;
        let key = key.into();
        let mut tables = self.tables.acquire()?;
        let replaced = tables.registry.register(key.clone(), block).is_some();
        drop(tables);

        debug!(target: "paramstore::registry", %key, replaced, "Parameter registered");
        Ok(())
    }

    /// Remove the registration for `key`
    ///
    /// Returns whether a registration was removed.
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn unregister_parameter(&self, key: &str) -> Result<bool> {
        self.ensure_ready()?;
        let removed = self.tables.acquire()?.registry.unregister(key).is_some();
        if removed {
            debug!(target: "paramstore::registry", %key, "Parameter unregistered");
        }
        Ok(removed)
    }

    /// Check whether `key` is registered
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn is_registered(&self, key: &str) -> Result<bool> {
        self.ensure_ready()?;
        Ok(self.tables.acquire()?.registry.contains(key))
    }

    /// Snapshot of the control block registered under `key`
    ///
    /// Intended for callers that already know the key exists. Waits for the
    /// lock without a timeout. Returns `None` for an unknown key or an
    /// uninitialized manager.
    pub fn get_control_block(&self, key: &str) -> Option<ControlBlock> {
        if !self.is_initialized() {
            return None;
        }
        self.tables.acquire_blocking().registry.get(key).cloned()
    }

    /// Resolve `key` to its backend; holds the lock only inside this call
    fn route(&self, key: &str) -> Result<Route> {
        self.ensure_ready()?;
        let tables = self.tables.acquire()?;
        let block = tables
            .registry
            .get(key)
            .ok_or_else(|| ParamError::KeyNotFound(key.to_string()))?;

        let (size, address, location) = match (block.size(), block.address(), block.storage()) {
            (Some(size), Some(address), Some(location)) => (size, address, location),
            _ => return Err(ParamError::Unconfigured(key.to_string())),
        };

        let driver = tables
            .drivers
            .driver(location)
            .ok_or(ParamError::NoDriverBound(location))?;

        Ok(Route {
            location,
            address,
            size,
            driver,
        })
    }

    /// Read the parameter's bytes into the front of `buf`
    ///
    /// Exactly `size` bytes are transferred, where `size` comes from the
    /// registered control block.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `LockTimeout`, `KeyNotFound`, `Unconfigured`,
    /// `NoDriverBound`, `BufferTooSmall`, or `DriverIo` if the backend fails.
    pub fn read(&self, key: &str, buf: &mut [u8]) -> Result<()> {
        let route = self.route(key)?;
        let provided = buf.len();
        let target = buf
            .get_mut(..route.size)
            .ok_or(ParamError::BufferTooSmall {
                required: route.size,
                provided,
            })?;

        debug!(
            target: "paramstore::manager",
            %key,
            location = %route.location,
            address = route.address,
            size = route.size,
            "Reading parameter"
        );
        route
            .driver
            .read(route.address, target)
            .map_err(|source| driver_failure(key, route.location, source))
    }

    /// Write the parameter's bytes from the front of `data`
    ///
    /// Exactly `size` bytes are transferred, where `size` comes from the
    /// registered control block.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `LockTimeout`, `KeyNotFound`, `Unconfigured`,
    /// `NoDriverBound`, `BufferTooSmall`, or `DriverIo` if the backend fails.
    pub fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let route = self.route(key)?;
        let payload = data.get(..route.size).ok_or(ParamError::BufferTooSmall {
            required: route.size,
            provided: data.len(),
        })?;

        debug!(
            target: "paramstore::manager",
            %key,
            location = %route.location,
            address = route.address,
            size = route.size,
            "Writing parameter"
        );
        route
            .driver
            .write(route.address, payload)
            .map_err(|source| driver_failure(key, route.location, source))
    }

    /// Run the parameter's refresh callback
    ///
    /// Returns the callback's own success flag. The callback runs on the
    /// caller's thread after the manager lock has been released.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `LockTimeout`, `KeyNotFound`, or `NoUpdateCallback`.
    pub fn update(&self, key: &str) -> Result<bool> {
        self.ensure_ready()?;
        let callback = {
            let tables = self.tables.acquire()?;
            let block = tables
                .registry
                .get(key)
                .ok_or_else(|| ParamError::KeyNotFound(key.to_string()))?;
            block.update_callback().cloned()
        };

        let callback = callback.ok_or_else(|| ParamError::NoUpdateCallback(key.to_string()))?;
        let refreshed = callback(key);
        debug!(target: "paramstore::manager", %key, refreshed, "Parameter update callback ran");
        Ok(refreshed)
    }

    /// Bind a backend to a storage location, replacing any previous binding
    ///
    /// Accepts a [`StorageLocation`], an `Option<StorageLocation>`, or a raw
    /// slot index.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `InvalidStorageSlot` for the "none" sentinel or a
    /// slot >= 8, or `LockTimeout`.
    pub fn register_memory_driver(&self, location: impl Slot, driver: DeviceHandle) -> Result<()> {
        self.ensure_ready()?;
        let location = location.into_location()?;
        let replaced = self
            .tables
            .acquire()?
            .drivers
            .bind_driver(location, driver)
            .is_some();

        debug!(target: "paramstore::manager", %location, replaced, "Memory driver bound");
        Ok(())
    }

    /// Remove the backend bound to a storage location
    ///
    /// Returns whether a backend was bound. The location's descriptor is kept.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `InvalidStorageSlot`, or `LockTimeout`.
    pub fn unregister_memory_driver(&self, location: impl Slot) -> Result<bool> {
        self.ensure_ready()?;
        let location = location.into_location()?;
        let removed = self
            .tables
            .acquire()?
            .drivers
            .unbind_driver(location)
            .is_some();
        if removed {
            debug!(target: "paramstore::manager", %location, "Memory driver unbound");
        }
        Ok(removed)
    }

    /// Attach capacity/partition metadata to a storage location
    ///
    /// Independent of whether a backend is bound there.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `InvalidStorageSlot`, or `LockTimeout`.
    pub fn register_memory_specs(&self, location: impl Slot, specs: MemorySpecs) -> Result<()> {
        self.ensure_ready()?;
        let location = location.into_location()?;
        self.tables.acquire()?.drivers.set_specs(location, specs);

        debug!(
            target: "paramstore::manager",
            %location,
            capacity = specs.capacity,
            "Memory specs registered"
        );
        Ok(())
    }

    /// Backend currently bound to a storage location
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `InvalidStorageSlot`, or `LockTimeout`.
    pub fn memory_driver(&self, location: impl Slot) -> Result<Option<DeviceHandle>> {
        self.ensure_ready()?;
        let location = location.into_location()?;
        Ok(self.tables.acquire()?.drivers.driver(location))
    }

    /// Descriptor attached to a storage location
    ///
    /// # Errors
    ///
    /// `NotInitialized`, `InvalidStorageSlot`, or `LockTimeout`.
    pub fn memory_specs(&self, location: impl Slot) -> Result<Option<MemorySpecs>> {
        self.ensure_ready()?;
        let location = location.into_location()?;
        Ok(self.tables.acquire()?.drivers.specs(location))
    }

    /// Locations that currently have a backend bound, in slot order
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn bound_locations(&self) -> Result<Vec<StorageLocation>> {
        self.ensure_ready()?;
        Ok(self.tables.acquire()?.drivers.bound_locations())
    }

    /// Number of registered parameters
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn len(&self) -> Result<usize> {
        self.ensure_ready()?;
        Ok(self.tables.acquire()?.registry.len())
    }

    /// True if no parameters are registered
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// All registered keys, sorted
    ///
    /// # Errors
    ///
    /// `NotInitialized` or `LockTimeout`.
    pub fn registered_keys(&self) -> Result<Vec<String>> {
        self.ensure_ready()?;
        Ok(self.tables.acquire()?.registry.keys())
    }
}

fn driver_failure(
    key: &str,
    location: StorageLocation,
    source: paramstore_core::DeviceError,
) -> ParamError {
    warn!(
        target: "paramstore::manager",
        %key,
        %location,
        error = %source,
        "Memory driver reported failure"
    );
    ParamError::DriverIo { location, source }
}

impl Default for ParameterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParameterManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterManager")
            .field("initialized", &self.is_initialized())
            .field("lock_timeout", &self.lock_timeout())
            .finish()
    }
}
