//! Step advancement
//!
//! Walks a sealed sequence one instruction at a time, gated on the
//! aggregate readiness of the cell.

pub mod controller;

pub use controller::{DispatchStatus, StepController, StepError};
