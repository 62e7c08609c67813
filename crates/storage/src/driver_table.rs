//! Driver table
//!
//! Fixed table with one slot per [`StorageLocation`]. Each slot independently
//! holds an optional backend handle and an optional [`MemorySpecs`]
//! descriptor. Slots are indexed by a validated location, so there is no
//! "none" or out-of-range slot to guard against here.

use paramstore_core::{DeviceHandle, MemorySpecs, StorageLocation, LOCATION_COUNT};
use std::fmt;

#[derive(Clone, Default)]
struct DriverSlot {
    driver: Option<DeviceHandle>,
    specs: Option<MemorySpecs>,
}

/// Storage location → backend binding
#[derive(Clone, Default)]
pub struct DriverTable {
    slots: [DriverSlot; LOCATION_COUNT],
}

impl DriverTable {
    /// Create a table with every slot empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a backend to `location`, returning the previous binding
    pub fn bind_driver(
        &mut self,
        location: StorageLocation,
        driver: DeviceHandle,
    ) -> Option<DeviceHandle> {
        self.slots[location.index()].driver.replace(driver)
    }

    /// Remove the backend bound to `location`; its descriptor stays
    pub fn unbind_driver(&mut self, location: StorageLocation) -> Option<DeviceHandle> {
        self.slots[location.index()].driver.take()
    }

    /// Shared handle to the backend bound to `location`
    pub fn driver(&self, location: StorageLocation) -> Option<DeviceHandle> {
        self.slots[location.index()].driver.clone()
    }

    /// Attach a descriptor to `location`, returning the previous one
    pub fn set_specs(&mut self, location: StorageLocation, specs: MemorySpecs) -> Option<MemorySpecs> {
        self.slots[location.index()].specs.replace(specs)
    }

    /// Descriptor attached to `location`
    pub fn specs(&self, location: StorageLocation) -> Option<MemorySpecs> {
        self.slots[location.index()].specs
    }

    /// Locations that currently have a backend bound
    pub fn bound_locations(&self) -> Vec<StorageLocation> {
        StorageLocation::ALL
            .into_iter()
            .filter(|location| self.slots[location.index()].driver.is_some())
            .collect()
    }

    /// Drop every binding and descriptor
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

impl fmt::Debug for DriverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let described = self.slots.iter().filter(|slot| slot.specs.is_some()).count();
        f.debug_struct("DriverTable")
            .field("bound", &self.bound_locations())
            .field("described", &described)
            .finish()
    }
}
