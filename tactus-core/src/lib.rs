//! Cell-agnostic core logic for the Tactus process controller
//!
//! This crate contains all application logic that does not depend on
//! the physical devices or on the host environment:
//!
//! - Device abstraction trait (readiness query, status update)
//! - Sequence compiler for the process-definition language
//! - Step advancement state machine
//!
//! Everything here is synchronous and single-writer; the host process
//! crate owns the driving loop.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod sequence;
pub mod step;
pub mod traits;
