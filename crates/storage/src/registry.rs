//! Parameter registry
//!
//! Maps string keys to [`ControlBlock`]s. Keys are unique; registering an
//! existing key replaces its block wholesale. Blocks are never mutated in
//! place.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = ParameterRegistry::with_capacity(16);
//!
//! registry.register("temp", block);
//! assert!(registry.contains("temp"));
//!
//! let previous = registry.unregister("temp");
//! ```
//!
//! The registry is not synchronized; the manager guards it with its lock.

use paramstore_core::ControlBlock;
use rustc_hash::FxHashMap;
use std::fmt;

/// Key → control block mapping
#[derive(Clone, Default)]
pub struct ParameterRegistry {
    params: FxHashMap<String, ControlBlock>,
}

impl ParameterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry pre-sized for `capacity` parameters
    pub fn with_capacity(capacity: usize) -> Self {
        ParameterRegistry {
            params: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Register a control block, replacing any block already under `key`
    ///
    /// Returns the replaced block.
    pub fn register(&mut self, key: impl Into<String>, block: ControlBlock) -> Option<ControlBlock> {
        self.params.insert(key.into(), block)
    }

    /// Remove the block registered under `key`
    pub fn unregister(&mut self, key: &str) -> Option<ControlBlock> {
        self.params.remove(key)
    }

    /// Get the block registered under `key`
    pub fn get(&self, key: &str) -> Option<&ControlBlock> {
        self.params.get(key)
    }

    /// Check if `key` is registered
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.params.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Get the number of registered parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters the registry can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.params.capacity()
    }

    /// Remove every registered parameter
    pub fn clear(&mut self) {
        self.params.clear();
    }
}

impl fmt::Debug for ParameterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("param_count", &self.params.len())
            .field("capacity", &self.params.capacity())
            .finish()
    }
}
