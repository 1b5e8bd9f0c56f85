//! Device collection trait
//!
//! The step controller never talks to a device directly. It sees the
//! whole cell through this trait: one aggregate readiness gate and one
//! entry point for handing over an instruction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Condition a device reports to the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Situation {
    /// Powering up, not yet accepting commands
    Initializing,
    /// Idle, ready for the next command
    Standby,
    /// Executing a command
    Running,
    /// Fault reported; operator attention required
    Fault,
}

impl Situation {
    /// Check if this situation permits progression to the next step
    pub fn is_standby(&self) -> bool {
        matches!(self, Situation::Standby)
    }
}

/// Trait for the device collection backing a step controller
///
/// Implementations own the per-device bookkeeping and whatever command
/// protocols the cell speaks. Both calls are synchronous; an
/// implementation wrapping something asynchronous must block until the
/// underlying operation completes, so an instruction is confirmed
/// dispatched before the controller moves its cursor past it.
pub trait DeviceBus {
    /// Check whether every managed device is in the given situation
    fn check_devices(&self, situation: Situation) -> bool;

    /// Forward one instruction token to the cell
    ///
    /// Returns `false` when the cell could not accept the instruction,
    /// e.g. because it addresses an unknown device. A rejected dispatch
    /// is reported, not fatal; the controller keeps walking.
    fn update_status(&mut self, instruction: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_standby_permits_progression() {
        assert!(Situation::Standby.is_standby());
        assert!(!Situation::Initializing.is_standby());
        assert!(!Situation::Running.is_standby());
        assert!(!Situation::Fault.is_standby());
    }
}
