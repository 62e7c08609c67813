//! Storage-location encoding and driver resolution.

use crate::common::*;
use paramstore::codec::{decode_storage, STORAGE_MASK};
use paramstore::{ControlBlock, MemoryBackend, ParamError, StorageLocation};
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn every_location_round_trips_through_builder_and_codec() {
    for location in StorageLocation::ALL {
        let built = ControlBlock::builder().storage(location).build();
        assert_eq!(decode_storage(built.config()), Some(location));

        let rebuilt = ControlBlock::builder().config(built.config()).build();
        assert_eq!(rebuilt.storage(), Some(location));
    }
}

#[test]
fn cleared_block_decodes_to_none() {
    let mut builder = ControlBlock::builder().storage(StorageLocation::ExternalFlash2);
    builder.clear();
    assert_eq!(decode_storage(builder.build().config()), None);
    assert_eq!(decode_storage(0), None);
}

#[test]
fn each_location_routes_to_its_own_driver() {
    let manager = ready_manager(16);
    let devices: Vec<Arc<MemoryBackend>> = StorageLocation::ALL
        .iter()
        .map(|_| Arc::new(MemoryBackend::volatile(8)))
        .collect();

    for (location, device) in StorageLocation::ALL.iter().zip(&devices) {
        manager
            .register_memory_driver(*location, device.clone())
            .unwrap();
        manager
            .register_parameter(location.name(), block(1, 0, *location))
            .unwrap();
    }

    for (i, location) in StorageLocation::ALL.iter().enumerate() {
        manager.write(location.name(), &[i as u8 + 1]).unwrap();
    }

    for (i, device) in devices.iter().enumerate() {
        assert_eq!(device.contents(0, 1).unwrap(), vec![i as u8 + 1]);
        assert_eq!(device.write_count(), 1);
    }
}

#[test]
fn registered_key_without_bound_driver_fails() {
    let manager = ready_manager(4);
    manager
        .register_parameter("k", block(4, 0, StorageLocation::ExternalSram1))
        .unwrap();
    assert!(manager.is_registered("k").unwrap());

    let mut buf = [0u8; 4];
    assert!(matches!(
        manager.read("k", &mut buf),
        Err(ParamError::NoDriverBound(StorageLocation::ExternalSram1))
    ));
    assert!(matches!(
        manager.write("k", &buf),
        Err(ParamError::NoDriverBound(StorageLocation::ExternalSram1))
    ));
}

#[test]
fn driver_registration_rejects_sentinel_and_out_of_range() {
    let manager = ready_manager(4);
    let decoded_none = decode_storage(0);
    assert!(decoded_none.is_none());

    assert!(matches!(
        manager.register_memory_driver(decoded_none, Arc::new(MemoryBackend::volatile(1))),
        Err(ParamError::InvalidStorageSlot(None))
    ));
    for slot in [8u8, 9, 100, u8::MAX] {
        assert!(matches!(
            manager.register_memory_driver(slot, Arc::new(MemoryBackend::volatile(1))),
            Err(ParamError::InvalidStorageSlot(Some(s))) if s == slot
        ));
    }
    for slot in 0u8..8 {
        manager
            .register_memory_driver(slot, Arc::new(MemoryBackend::volatile(1)))
            .unwrap();
    }
    assert_eq!(
        manager.bound_locations().unwrap(),
        StorageLocation::ALL.to_vec()
    );
}

#[test]
fn backend_failure_surfaces_once() {
    let manager = ready_manager(4);
    let device = Arc::new(MemoryBackend::volatile(8));
    manager
        .register_memory_driver(StorageLocation::InternalFlash, device.clone())
        .unwrap();
    manager
        .register_parameter("k", block(4, 0, StorageLocation::InternalFlash))
        .unwrap();

    device.fail_next_read();
    let mut buf = [0u8; 4];
    assert!(matches!(
        manager.read("k", &mut buf),
        Err(ParamError::DriverIo { .. })
    ));
    assert_eq!(device.read_count(), 1);

    manager.read("k", &mut buf).unwrap();
    assert_eq!(device.read_count(), 2);
}

proptest! {
    #[test]
    fn garbage_never_decodes_to_a_false_location(config in any::<u32>()) {
        if let Some(location) = decode_storage(config) {
            let expected = ControlBlock::builder().storage(location).build().config();
            prop_assert_eq!(config & STORAGE_MASK, expected & STORAGE_MASK);
        }
    }

    #[test]
    fn reserved_bits_survive_storage_changes(reserved in any::<u32>(), slot in 0u8..8) {
        let location = StorageLocation::try_from(slot).unwrap();
        let block = ControlBlock::builder().config(reserved).storage(location).build();
        prop_assert_eq!(block.config() & !STORAGE_MASK, reserved & !STORAGE_MASK);
        prop_assert_eq!(block.storage(), Some(location));
    }
}
