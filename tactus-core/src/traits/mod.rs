//! Device abstraction
//!
//! The interface between the step controller and whatever owns the
//! physical devices of the cell.

pub mod device;

pub use device::{DeviceBus, Situation};
