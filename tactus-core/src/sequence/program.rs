//! Compiled program representation

use alloc::vec::Vec;

/// Maximum instruction token length
pub const MAX_INSTRUCTION_LEN: usize = 64;

/// Reserved instruction denoting end of sequence
pub const FINISHED: &str = "finished";

/// Sentinel initial command: no externally supplied step, start straight
/// into the compiled sequence
pub const INIT_COMMAND: &str = "init";

/// An opaque command token consumed by a device subsystem
pub type Instruction = heapless::String<MAX_INSTRUCTION_LEN>;

/// An ordered step list terminated by [`FINISHED`]
///
/// Immutable after construction. Always non-empty: sealing appends the
/// terminal marker when the compiled output does not already end with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSequence {
    steps: Vec<Instruction>,
}

impl CompiledSequence {
    /// Seal a compiled step list
    ///
    /// The compiler leaves termination to its caller; this is where the
    /// terminal-marker invariant is established.
    pub fn seal(mut steps: Vec<Instruction>) -> Self {
        if steps.last().map(|s| s.as_str()) != Some(FINISHED) {
            let mut marker = Instruction::new();
            let _ = marker.push_str(FINISHED);
            steps.push(marker);
        }
        Self { steps }
    }

    /// The minimal safe sequence: a single terminal marker
    ///
    /// Loaders substitute this when compilation fails, so a controller
    /// is never constructed with zero executable steps.
    pub fn safe_fallback() -> Self {
        Self::seal(Vec::new())
    }

    /// Number of steps, terminal marker included
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Step at `index`
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.steps.get(index)
    }

    /// All steps in order
    pub fn steps(&self) -> &[Instruction] {
        &self.steps
    }
}
