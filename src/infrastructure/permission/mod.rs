//! Microphone permission adapters

mod device;

pub use device::DevicePermission;
