//! Step controller state machine
//!
//! The controller owns the sealed sequence, a cursor, and the injected
//! device bus. Exactly one step is current at a time and the cursor
//! never moves backwards. Advancement is driven externally (a polling
//! loop), gated on [`StepController::is_ready_to_advance`].

use crate::sequence::{CompiledSequence, Instruction, INIT_COMMAND};
use crate::traits::{DeviceBus, Situation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from the step controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepError {
    /// `advance()` called after the sequence completed
    ///
    /// A caller-contract violation: the driving loop must check
    /// [`StepController::is_sequence_completed`] first. Controller state
    /// is left untouched.
    SequenceExhausted { index: usize },
}

/// Cosmetic result of one device-status dispatch
///
/// Mirrors the device bus boolean for logging and telemetry. Not part of
/// the state machine: a rejected dispatch does not block advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DispatchStatus {
    /// The cell accepted the instruction
    Accepted,
    /// The cell rejected the instruction
    Rejected,
}

impl DispatchStatus {
    /// Log string for this dispatch result
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Accepted => "update device status success",
            DispatchStatus::Rejected => "update device status error",
        }
    }
}

impl From<bool> for DispatchStatus {
    fn from(accepted: bool) -> Self {
        if accepted {
            DispatchStatus::Accepted
        } else {
            DispatchStatus::Rejected
        }
    }
}

/// Step controller for one compiled sequence
///
/// Single-writer: all calls must come from one driving loop. Aborting a
/// running sequence is done by dropping the controller and constructing
/// a new one.
#[derive(Debug)]
pub struct StepController<D: DeviceBus> {
    /// Sealed program
    sequence: CompiledSequence,
    /// Next position to draw from the sequence
    cursor: usize,
    /// Instruction currently considered active
    current: Instruction,
    /// The constructor command still has to be applied (one-shot)
    seed_pending: bool,
    /// Injected device collection
    devices: D,
}

impl<D: DeviceBus> StepController<D> {
    /// Create a controller
    ///
    /// `command` is the externally supplied initial command. Unless it is
    /// the [`INIT_COMMAND`] sentinel, the first [`Self::advance`] applies
    /// it exactly once before the compiled sequence begins.
    pub fn new(command: Instruction, sequence: CompiledSequence, devices: D) -> Self {
        let seed_pending = command.as_str() != INIT_COMMAND;
        Self {
            sequence,
            cursor: 0,
            current: command,
            seed_pending,
            devices,
        }
    }

    /// The instruction currently considered active
    pub fn current_step(&self) -> &str {
        self.current.as_str()
    }

    /// Check whether every device in the cell reports standby
    pub fn is_ready_to_advance(&self) -> bool {
        self.devices.check_devices(Situation::Standby)
    }

    /// True once the cursor has consumed the whole sequence
    pub fn is_sequence_completed(&self) -> bool {
        self.cursor >= self.sequence.len()
    }

    /// The sealed sequence this controller walks
    pub fn sequence(&self) -> &CompiledSequence {
        &self.sequence
    }

    /// Access the device bus
    pub fn devices(&self) -> &D {
        &self.devices
    }

    /// Mutable access to the device bus, for external status reports
    pub fn devices_mut(&mut self) -> &mut D {
        &mut self.devices
    }

    /// Advance the state machine by one step
    ///
    /// The pending seed command, if any, is applied first and does not
    /// consume a sequence position. Every other call draws the
    /// instruction at the cursor, makes it current, dispatches it, and
    /// moves the cursor.
    pub fn advance(&mut self) -> Result<DispatchStatus, StepError> {
        if self.seed_pending {
            self.seed_pending = false;
            let accepted = self.devices.update_status(self.current.as_str());
            return Ok(DispatchStatus::from(accepted));
        }

        let next = self
            .sequence
            .get(self.cursor)
            .ok_or(StepError::SequenceExhausted { index: self.cursor })?
            .clone();
        self.current = next;
        let accepted = self.devices.update_status(self.current.as_str());
        self.cursor += 1;
        Ok(DispatchStatus::from(accepted))
    }
}
