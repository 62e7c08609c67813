//! Config word encoding
//!
//! The only place where a storage location is bit-packed. Everything else in
//! the workspace works with [`StorageLocation`] values; the packed `u32` exists
//! for exchanging control-block metadata in a compact, wire-style form.
//!
//! ## Layout
//!
//! ```text
//! bit  31 ............ 4 | 3       | 2 1 0
//!      reserved          | present | location index
//! ```
//!
//! A location is encoded as `PRESENT | index`, giving the eight valid
//! patterns `0b1000..=0b1111`. Any other value of the low nibble, including
//! a cleared word, decodes to `None`. Reserved bits are carried through
//! untouched by every operation here.

use crate::location::{StorageLocation, LOCATION_COUNT};

/// Mask selecting the storage field (present bit + index)
pub const STORAGE_MASK: u32 = 0b1111;

/// Set on every valid encoding
pub const STORAGE_PRESENT: u32 = 0b1000;

/// Mask selecting the location index inside the storage field
pub const STORAGE_INDEX_MASK: u32 = 0b0111;

/// Encoded pattern for each location, indexed by slot
const PATTERNS: [u32; LOCATION_COUNT] = [
    STORAGE_PRESENT,
    STORAGE_PRESENT | 1,
    STORAGE_PRESENT | 2,
    STORAGE_PRESENT | 3,
    STORAGE_PRESENT | 4,
    STORAGE_PRESENT | 5,
    STORAGE_PRESENT | 6,
    STORAGE_PRESENT | 7,
];

/// Bit pattern for a location, already positioned in the storage field
pub const fn encode_storage(location: StorageLocation) -> u32 {
    PATTERNS[location.index()]
}

/// Decode the storage field of a config word
///
/// Only an exact match against one of the eight patterns yields a location.
pub fn decode_storage(config: u32) -> Option<StorageLocation> {
    let field = config & STORAGE_MASK;
    PATTERNS
        .iter()
        .position(|&pattern| pattern == field)
        .and_then(StorageLocation::from_index)
}

/// Replace the storage field of `config`, preserving reserved bits
pub const fn set_storage(config: u32, location: StorageLocation) -> u32 {
    clear_storage(config) | encode_storage(location)
}

/// Clear the storage field of `config`, preserving reserved bits
pub const fn clear_storage(config: u32) -> u32 {
    config & !STORAGE_MASK
}

/// The reserved bits of `config` (everything outside the storage field)
pub const fn reserved_bits(config: u32) -> u32 {
    clear_storage(config)
}

/// Build a config word from its parts
///
/// Storage-field bits present in `reserved` are discarded.
pub const fn pack(storage: Option<StorageLocation>, reserved: u32) -> u32 {
    match storage {
        Some(location) => set_storage(reserved, location),
        None => clear_storage(reserved),
    }
}

/// Split a config word into its decoded location and reserved bits
pub fn unpack(config: u32) -> (Option<StorageLocation>, u32) {
    (decode_storage(config), reserved_bits(config))
}
