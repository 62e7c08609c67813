//! Core types for the parameter manager
//!
//! This crate defines the vocabulary shared by every other layer:
//! - StorageLocation: the eight memory regions a parameter can live in
//! - codec: the single encode/decode boundary for packed config words
//! - ControlBlock / ControlBlockBuilder: parameter metadata and its builder
//! - MemoryDevice / MemorySpecs: the storage backend contract and its descriptor
//! - ParamError: error taxonomy for all manager operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod control_block;
pub mod device;
pub mod error;
pub mod location;

pub use control_block::{ControlBlock, ControlBlockBuilder, UpdateCallback};
pub use device::{DeviceError, DeviceHandle, MemoryDevice, MemorySpecs};
pub use error::{ParamError, Result};
pub use location::{Slot, StorageLocation, LOCATION_COUNT};
