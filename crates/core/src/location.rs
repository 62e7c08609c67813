//! Storage locations a parameter can live in
//!
//! There are exactly eight locations: two on-chip regions and six external
//! devices. Code that decodes a packed config word represents the "none"
//! sentinel as `Option::None` rather than as a ninth variant.

use crate::error::{ParamError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of addressable storage locations (and Driver Table slots)
pub const LOCATION_COUNT: usize = 8;

/// Physical or logical memory region backing a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StorageLocation {
    /// On-chip volatile memory
    InternalSram = 0,
    /// On-chip non-volatile memory
    InternalFlash = 1,
    /// First external non-volatile device
    ExternalFlash0 = 2,
    /// Second external non-volatile device
    ExternalFlash1 = 3,
    /// Third external non-volatile device
    ExternalFlash2 = 4,
    /// First external volatile device
    ExternalSram0 = 5,
    /// Second external volatile device
    ExternalSram1 = 6,
    /// Third external volatile device
    ExternalSram2 = 7,
}

impl StorageLocation {
    /// All locations in slot order
    pub const ALL: [StorageLocation; LOCATION_COUNT] = [
        StorageLocation::InternalSram,
        StorageLocation::InternalFlash,
        StorageLocation::ExternalFlash0,
        StorageLocation::ExternalFlash1,
        StorageLocation::ExternalFlash2,
        StorageLocation::ExternalSram0,
        StorageLocation::ExternalSram1,
        StorageLocation::ExternalSram2,
    ];

    /// Driver Table slot index for this location (always < 8)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a location by slot index
    pub const fn from_index(index: usize) -> Option<StorageLocation> {
        if index < LOCATION_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Stable lowercase name, matching the serde representation
    pub const fn name(self) -> &'static str {
        match self {
            StorageLocation::InternalSram => "internal_sram",
            StorageLocation::InternalFlash => "internal_flash",
            StorageLocation::ExternalFlash0 => "external_flash0",
            StorageLocation::ExternalFlash1 => "external_flash1",
            StorageLocation::ExternalFlash2 => "external_flash2",
            StorageLocation::ExternalSram0 => "external_sram0",
            StorageLocation::ExternalSram1 => "external_sram1",
            StorageLocation::ExternalSram2 => "external_sram2",
        }
    }

    /// True for the two on-chip regions
    pub const fn is_internal(self) -> bool {
        matches!(
            self,
            StorageLocation::InternalSram | StorageLocation::InternalFlash
        )
    }

    /// True for SRAM-like regions whose contents do not survive power loss
    pub const fn is_volatile(self) -> bool {
        matches!(
            self,
            StorageLocation::InternalSram
                | StorageLocation::ExternalSram0
                | StorageLocation::ExternalSram1
                | StorageLocation::ExternalSram2
        )
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for StorageLocation {
    type Error = ParamError;

    fn try_from(slot: u8) -> Result<Self> {
        StorageLocation::from_index(slot as usize).ok_or(ParamError::InvalidStorageSlot(Some(slot)))
    }
}

/// Anything that names a Driver Table slot
///
/// Registration calls accept a typed location, the decoded form
/// (`Option<StorageLocation>`, where `None` is the "no location" sentinel),
/// or a raw slot index. The sentinel and indices >= 8 are rejected with
/// [`ParamError::InvalidStorageSlot`].
pub trait Slot {
    /// Resolve to a valid location
    fn into_location(self) -> Result<StorageLocation>;
}

impl Slot for StorageLocation {
    fn into_location(self) -> Result<StorageLocation> {
        Ok(self)
    }
}

impl Slot for Option<StorageLocation> {
    fn into_location(self) -> Result<StorageLocation> {
        self.ok_or(ParamError::InvalidStorageSlot(None))
    }
}

impl Slot for u8 {
    fn into_location(self) -> Result<StorageLocation> {
        StorageLocation::try_from(self)
    }
}
