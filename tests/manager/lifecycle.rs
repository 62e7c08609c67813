//! Uninitialized/ready state machine.

use crate::common::*;
use paramstore::{MemoryBackend, MemorySpecs, ParamError, ParameterManager, StorageLocation};
use std::sync::Arc;

#[test]
fn every_operation_fails_before_init() {
    let manager = ParameterManager::new();
    let location = StorageLocation::InternalFlash;
    let mut buf = [0u8; 4];

    let results = [
        manager
            .register_parameter("k", block(4, 0, location))
            .map(|_| ()),
        manager.unregister_parameter("k").map(|_| ()),
        manager.is_registered("k").map(|_| ()),
        manager.read("k", &mut buf),
        manager.write("k", &[0; 4]),
        manager.update("k").map(|_| ()),
        manager.register_memory_driver(location, Arc::new(MemoryBackend::volatile(4))),
        manager.register_memory_specs(location, MemorySpecs::new(0, 4)),
    ];

    for result in results {
        assert!(matches!(result, Err(ParamError::NotInitialized)));
    }
}

#[test]
fn init_enters_ready_state() {
    let manager = ParameterManager::new();
    assert!(!manager.is_initialized());
    manager.init(4);
    assert!(manager.is_initialized());
    assert!(manager.is_empty().unwrap());
}

#[test]
fn reinit_discards_registrations_and_bindings() {
    let manager = ready_manager(8);
    let location = StorageLocation::ExternalFlash1;
    manager
        .register_parameter("k", block(4, 0, location))
        .unwrap();
    manager
        .register_memory_driver(location, Arc::new(MemoryBackend::erased(16)))
        .unwrap();
    manager
        .register_memory_specs(location, MemorySpecs::new(0, 16))
        .unwrap();

    manager.init(8);

    assert!(!manager.is_registered("k").unwrap());
    assert!(manager.memory_driver(location).unwrap().is_none());
    assert!(manager.memory_specs(location).unwrap().is_none());
}

#[test]
fn reinit_releases_driver_handles() {
    let manager = ready_manager(8);
    let device = Arc::new(MemoryBackend::volatile(16));
    manager
        .register_memory_driver(StorageLocation::InternalSram, device.clone())
        .unwrap();
    assert_eq!(Arc::strong_count(&device), 2);

    manager.init(8);
    assert_eq!(Arc::strong_count(&device), 1);
}

#[test]
fn register_unregister_laws() {
    let manager = ready_manager(8);
    for key in ["a", "b", "c"] {
        manager
            .register_parameter(key, block(1, 0, StorageLocation::InternalSram))
            .unwrap();
        assert!(manager.is_registered(key).unwrap());
    }
    for key in ["a", "b", "c"] {
        assert!(manager.unregister_parameter(key).unwrap());
        assert!(!manager.is_registered(key).unwrap());
    }
}

#[test]
fn reregistration_overwrites_wholesale() {
    let manager = ready_manager(8);
    manager
        .register_parameter("k", block(4, 0x10, StorageLocation::ExternalFlash0))
        .unwrap();
    manager
        .register_parameter("k", block(2, 0x20, StorageLocation::ExternalSram2))
        .unwrap();

    let current = manager.get_control_block("k").unwrap();
    assert_eq!(current.size(), Some(2));
    assert_eq!(current.address(), Some(0x20));
    assert_eq!(current.storage(), Some(StorageLocation::ExternalSram2));
}

#[test]
fn failed_operation_leaves_state_unchanged() {
    let manager = ready_manager(8);
    manager
        .register_parameter("k", block(4, 0, StorageLocation::ExternalFlash0))
        .unwrap();

    assert!(manager
        .register_memory_driver(9u8, Arc::new(MemoryBackend::volatile(4)))
        .is_err());
    assert!(manager.bound_locations().unwrap().is_empty());
    assert_eq!(manager.registered_keys().unwrap(), vec!["k"]);
}
