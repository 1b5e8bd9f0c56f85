//! Process-definition language
//!
//! Compiles raw sequence lines into a flat instruction list and seals
//! the result with the terminal marker.

pub mod compiler;
pub mod program;

pub use compiler::{compile, CompileError};
pub use program::{
    CompiledSequence, Instruction, FINISHED, INIT_COMMAND, MAX_INSTRUCTION_LEN,
};
