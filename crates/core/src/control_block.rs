//! Parameter control blocks
//!
//! A [`ControlBlock`] describes where a parameter lives: how many bytes it
//! occupies, at which address, in which [`StorageLocation`], and optionally how
//! to refresh it at its source. Blocks are immutable once built; the
//! [`ControlBlockBuilder`] accumulates settings and emits snapshots.
//!
//! ```
//! use paramstore_core::{ControlBlock, StorageLocation};
//!
//! let block = ControlBlock::builder()
//!     .size(4)
//!     .address(0x100)
//!     .storage(StorageLocation::ExternalFlash0)
//!     .build();
//!
//! assert_eq!(block.size(), Some(4));
//! assert_eq!(block.storage(), Some(StorageLocation::ExternalFlash0));
//! ```

use crate::codec;
use crate::location::StorageLocation;
use std::fmt;
use std::sync::Arc;

/// Refresh hook invoked by `update` with the parameter's key
///
/// Returns `true` if the refresh succeeded.
pub type UpdateCallback = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Metadata describing one registered parameter
///
/// `None` in any field means "not configured".
#[derive(Clone, Default)]
pub struct ControlBlock {
    size: Option<usize>,
    address: Option<u32>,
    storage: Option<StorageLocation>,
    reserved: u32,
    update: Option<UpdateCallback>,
}

impl ControlBlock {
    /// Start building a control block
    pub fn builder() -> ControlBlockBuilder {
        ControlBlockBuilder::new()
    }

    /// Byte length of the described value
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Location of the value within its backend's address space
    pub fn address(&self) -> Option<u32> {
        self.address
    }

    /// Decoded storage location, `None` if unset
    pub fn storage(&self) -> Option<StorageLocation> {
        self.storage
    }

    /// Reserved config bits carried alongside the location
    pub fn reserved_bits(&self) -> u32 {
        self.reserved
    }

    /// Packed config word: storage field plus reserved bits
    pub fn config(&self) -> u32 {
        codec::pack(self.storage, self.reserved)
    }

    /// Refresh callback, if one was attached
    pub fn update_callback(&self) -> Option<&UpdateCallback> {
        self.update.as_ref()
    }

    /// True if a refresh callback was attached
    pub fn has_update_callback(&self) -> bool {
        self.update.is_some()
    }
}

impl fmt::Debug for ControlBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlBlock")
            .field("size", &self.size)
            .field("address", &self.address)
            .field("storage", &self.storage)
            .field("config", &format_args!("{:#010x}", self.config()))
            .field("update", &self.update.is_some())
            .finish()
    }
}

/// Accumulates control block settings
///
/// Setters chain by value; [`build`](Self::build) takes `&self`, so the same
/// builder can emit several snapshots. [`clear`](Self::clear) returns every
/// field to "not configured" and drops any callback.
#[derive(Clone, Default)]
pub struct ControlBlockBuilder {
    block: ControlBlock,
}

impl ControlBlockBuilder {
    /// Create a builder with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the byte length of the value
    pub fn size(mut self, size: usize) -> Self {
        self.block.size = Some(size);
        self
    }

    /// Set the address within the backend
    pub fn address(mut self, address: u32) -> Self {
        self.block.address = Some(address);
        self
    }

    /// Set the storage location; reserved bits are kept
    pub fn storage(mut self, location: StorageLocation) -> Self {
        self.block.storage = Some(location);
        self
    }

    /// Load a packed config word: location and reserved bits together
    ///
    /// A word whose storage field matches no location leaves the storage unset.
    pub fn config(mut self, config: u32) -> Self {
        let (storage, reserved) = codec::unpack(config);
        self.block.storage = storage;
        self.block.reserved = reserved;
        self
    }

    /// Attach a refresh callback
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.block.update = Some(Arc::new(callback));
        self
    }

    /// Attach (or with `None`, detach) a shared refresh callback
    pub fn update_callback(mut self, callback: Option<UpdateCallback>) -> Self {
        self.block.update = callback;
        self
    }

    /// Snapshot the current settings
    pub fn build(&self) -> ControlBlock {
        self.block.clone()
    }

    /// Reset every field to "not configured"
    pub fn clear(&mut self) {
        self.block = ControlBlock::default();
    }
}

impl fmt::Debug for ControlBlockBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ControlBlockBuilder")
            .field(&self.block)
            .finish()
    }
}
