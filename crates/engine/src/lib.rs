//! Parameter manager engine
//!
//! This crate orchestrates the lower layers:
//! - ParameterManager: init/ready lifecycle, registration, routed I/O, refresh
//! - ManagerConfig: TOML configuration (lock timeout, capacity, descriptors)
//!
//! The engine is the only component that knows about:
//! - The lock discipline (metadata under the lock, I/O after release)
//! - Resolving a key to a backend through its control block

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod manager;

pub use config::{ManagerConfig, MemoryConfig, CONFIG_FILE_NAME};
pub use manager::ParameterManager;
