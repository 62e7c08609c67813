//! Storage layer for the parameter manager
//!
//! This crate holds the manager's two tables and a reference backend:
//! - ParameterRegistry: key → control block, FxHashMap-backed
//! - DriverTable: one slot per storage location, each with an optional
//!   backend handle and an optional descriptor
//! - MemoryBackend: RAM-backed device for internal SRAM and tests
//!
//! Neither table is synchronized on its own; the engine guards both with a
//! single bounded-timeout lock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver_table;
pub mod memory;
pub mod registry;

pub use driver_table::DriverTable;
pub use memory::{MemoryBackend, ERASED_BYTE};
pub use registry::ParameterRegistry;
