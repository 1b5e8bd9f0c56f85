//! Device collection implementations
//!
//! Concrete implementations of the `DeviceBus` trait defined in
//! tactus-core:
//!
//! - Device bank: bounded registry tracking per-device situations and
//!   routing instruction words by device-name prefix
//!
//! The per-device command protocols live outside this crate; their
//! status reports arrive through `DeviceBank::report`.

#![no_std]
#![deny(unsafe_code)]

pub mod bank;

pub use bank::{DeviceBank, DeviceRecord, MAX_DEVICES, MAX_DEVICE_NAME_LEN};
