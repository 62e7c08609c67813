//! End-to-end flows through the manager.

use crate::common::*;
use paramstore::codec::encode_storage;
use paramstore::{ControlBlock, ParamError, StorageLocation};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn write_then_read_through_external_flash() {
    let manager = ready_manager(10);
    let device = RecordingDevice::new(0x400);

    let temp = ControlBlock::builder()
        .size(4)
        .address(0x100)
        .config(encode_storage(StorageLocation::ExternalFlash0))
        .build();

    manager.register_parameter("temp", temp).unwrap();
    manager
        .register_memory_driver(StorageLocation::ExternalFlash0, device.clone())
        .unwrap();

    manager.write("temp", &[1, 2, 3, 4]).unwrap();
    let mut buf = [0u8; 4];
    manager.read("temp", &mut buf).unwrap();

    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::Write {
                address: 0x100,
                data: vec![1, 2, 3, 4]
            },
            DeviceCall::Read {
                address: 0x100,
                len: 4
            },
        ]
    );
}

#[test]
fn missing_key_is_not_registered_and_not_readable() {
    let manager = ready_manager(10);

    assert!(!manager.is_registered("missing").unwrap());
    let mut buf = [0u8; 4];
    assert!(matches!(
        manager.read("missing", &mut buf),
        Err(ParamError::KeyNotFound(_))
    ));
}

#[test]
fn update_runs_callback_exactly_once() {
    let manager = ready_manager(10);
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);

    manager
        .register_parameter(
            "baro_offset",
            ControlBlock::builder()
                .size(4)
                .address(0)
                .storage(StorageLocation::InternalSram)
                .on_update(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                })
                .build(),
        )
        .unwrap();

    assert!(manager.update("baro_offset").unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn update_does_not_touch_drivers() {
    let manager = ready_manager(10);
    let device = RecordingDevice::new(16);
    manager
        .register_memory_driver(StorageLocation::InternalSram, device.clone())
        .unwrap();
    manager
        .register_parameter(
            "refresh_only",
            ControlBlock::builder()
                .size(4)
                .address(0)
                .storage(StorageLocation::InternalSram)
                .on_update(|_| true)
                .build(),
        )
        .unwrap();

    manager.update("refresh_only").unwrap();
    assert!(device.calls().is_empty());
}

#[test]
fn parameters_share_one_backend_at_different_addresses() {
    let manager = ready_manager(10);
    let device = RecordingDevice::new(64);
    manager
        .register_memory_driver(StorageLocation::ExternalSram0, device.clone())
        .unwrap();
    manager
        .register_parameter("roll", block(2, 0, StorageLocation::ExternalSram0))
        .unwrap();
    manager
        .register_parameter("pitch", block(2, 2, StorageLocation::ExternalSram0))
        .unwrap();

    manager.write("roll", &[0xAA, 0xBB]).unwrap();
    manager.write("pitch", &[0xCC, 0xDD]).unwrap();

    assert_eq!(
        device.memory().contents(0, 4).unwrap(),
        vec![0xAA, 0xBB, 0xCC, 0xDD]
    );
}
