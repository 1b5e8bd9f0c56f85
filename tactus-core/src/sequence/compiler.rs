//! Sequence compiler
//!
//! Expands the loop syntax of the process-definition language into a
//! flat instruction list. Grammar per line, matched against the trimmed
//! line:
//!
//! - `loop<ID>_<REPEAT>` opens a repeat block (REPEAT > 0)
//! - `loop<ID>_end` closes the innermost open block
//! - anything else is an opaque instruction token, carried verbatim
//!
//! Expansion happens when a block closes: the block body is concatenated
//! REPEAT times into the enclosing block, or into the output when the
//! block was top-level. An inner block therefore expands before its
//! enclosing one, which makes nesting compose without recursion.
//!
//! Expanded size is the product of the repeat counts along a nesting
//! chain. Process-control sequences are short; nothing here tries to
//! defer or share expansions.

use alloc::vec::Vec;

use super::program::Instruction;

/// Errors that can occur during sequence compilation
///
/// All of them abort the compilation attempt; the loader substitutes the
/// minimal safe sequence so the cell still has an executable program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompileError {
    /// Loop opened with a repeat count of zero
    InvalidRepeatCount { loop_id: u32 },
    /// Loop end marker with no open loop
    UnmatchedLoopEnd { loop_id: u32 },
    /// Loop end marker id differs from the innermost open loop
    LoopIdMismatch { expected: u32, found: u32 },
    /// Input ended with open loops remaining (innermost id reported)
    UnclosedLoop { loop_id: u32 },
    /// Instruction token exceeds [`super::MAX_INSTRUCTION_LEN`]
    InstructionTooLong,
}

/// One open repeat block during compilation
///
/// Exists only between its start and end markers; closing the block
/// expands its buffer into the parent.
#[derive(Debug, Clone)]
struct LoopFrame {
    id: u32,
    repeat: u32,
    block: Vec<Instruction>,
}

/// Strict decimal parse: ASCII digits only, no sign
///
/// `str::parse` accepts a leading `+`, which the grammar does not.
fn parse_uint(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Match `loop<ID>_<REPEAT>` against a trimmed line
fn parse_loop_start(line: &str) -> Option<(u32, u32)> {
    let rest = line.strip_prefix("loop")?;
    let (id, repeat) = rest.split_once('_')?;
    Some((parse_uint(id)?, parse_uint(repeat)?))
}

/// Match `loop<ID>_end` against a trimmed line
fn parse_loop_end(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("loop")?;
    let (id, tail) = rest.split_once('_')?;
    if tail != "end" {
        return None;
    }
    parse_uint(id)
}

/// Repeat-expand one closed block
///
/// Pure: `repeat` concatenated copies of `block`, body order preserved.
fn expand(block: &[Instruction], repeat: u32) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(block.len() * repeat as usize);
    for _ in 0..repeat {
        out.extend_from_slice(block);
    }
    out
}

/// Compile raw sequence lines into a flat instruction list
///
/// Deterministic: the same input always yields the same list. The result
/// is not yet sealed with the terminal marker; that is the loader's job
/// (see [`super::CompiledSequence::seal`]).
pub fn compile<'a, I>(lines: I) -> Result<Vec<Instruction>, CompileError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<Instruction> = Vec::new();
    let mut stack: Vec<LoopFrame> = Vec::new();

    for raw in lines {
        let line = raw.trim();

        if let Some((id, repeat)) = parse_loop_start(line) {
            if repeat == 0 {
                return Err(CompileError::InvalidRepeatCount { loop_id: id });
            }
            stack.push(LoopFrame {
                id,
                repeat,
                block: Vec::new(),
            });
            continue;
        }

        if let Some(id) = parse_loop_end(line) {
            let frame = stack
                .pop()
                .ok_or(CompileError::UnmatchedLoopEnd { loop_id: id })?;
            if frame.id != id {
                return Err(CompileError::LoopIdMismatch {
                    expected: frame.id,
                    found: id,
                });
            }
            let expanded = expand(&frame.block, frame.repeat);
            match stack.last_mut() {
                Some(parent) => parent.block.extend(expanded),
                None => out.extend(expanded),
            }
            continue;
        }

        let mut token = Instruction::new();
        token
            .push_str(raw)
            .map_err(|_| CompileError::InstructionTooLong)?;
        match stack.last_mut() {
            Some(frame) => frame.block.push(token),
            None => out.push(token),
        }
    }

    if let Some(frame) = stack.last() {
        return Err(CompileError::UnclosedLoop { loop_id: frame.id });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strs(steps: &[Instruction]) -> Vec<&str> {
        steps.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn loop_free_input_compiles_to_itself() {
        let out = compile(["weighing_open", "slider_weight_pos"]).unwrap();
        assert_eq!(as_strs(&out), ["weighing_open", "slider_weight_pos"]);
    }

    #[test]
    fn empty_input_compiles_to_empty() {
        let lines: [&str; 0] = [];
        let out = compile(lines).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn simple_loop_expands() {
        let out = compile(["loop1_3", "a", "b", "loop1_end"]).unwrap();
        assert_eq!(as_strs(&out), ["a", "b", "a", "b", "a", "b"]);
    }

    #[test]
    fn nested_loops_multiply() {
        let out = compile(["loop1_2", "loop2_2", "x", "loop2_end", "loop1_end"]).unwrap();
        assert_eq!(as_strs(&out), ["x", "x", "x", "x"]);
    }

    #[test]
    fn nested_loop_keeps_surrounding_body_order() {
        let out = compile([
            "before",
            "loop1_2",
            "head",
            "loop2_2",
            "x",
            "loop2_end",
            "tail",
            "loop1_end",
            "after",
        ])
        .unwrap();
        assert_eq!(
            as_strs(&out),
            [
                "before", "head", "x", "x", "tail", "head", "x", "x", "tail", "after"
            ]
        );
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let err = compile(["loop5_0", "x", "loop5_end"]).unwrap_err();
        assert_eq!(err, CompileError::InvalidRepeatCount { loop_id: 5 });
    }

    #[test]
    fn end_without_start_is_rejected() {
        let err = compile(["loop3_end"]).unwrap_err();
        assert_eq!(err, CompileError::UnmatchedLoopEnd { loop_id: 3 });
    }

    #[test]
    fn mismatched_end_id_is_rejected() {
        let err = compile(["loop1_2", "x", "loop2_end"]).unwrap_err();
        assert_eq!(
            err,
            CompileError::LoopIdMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn missing_end_is_rejected() {
        let err = compile(["loop1_2", "x"]).unwrap_err();
        assert_eq!(err, CompileError::UnclosedLoop { loop_id: 1 });
    }

    #[test]
    fn innermost_open_loop_is_reported() {
        let err = compile(["loop1_2", "loop2_3", "x"]).unwrap_err();
        assert_eq!(err, CompileError::UnclosedLoop { loop_id: 2 });
    }

    #[test]
    fn loop_markers_tolerate_surrounding_whitespace() {
        let out = compile(["  loop1_2  ", "x", "\tloop1_end"]).unwrap();
        assert_eq!(as_strs(&out), ["x", "x"]);
    }

    #[test]
    fn loop_lookalikes_are_plain_instructions() {
        // None of these match the grammar: missing id, signed repeat,
        // trailing garbage, id too large for u32.
        let lines = [
            "loop_2",
            "loop1_+3",
            "loop1_2_end",
            "loop1_2 extra",
            "loop99999999999999999999_2",
            "looping",
        ];
        let out = compile(lines).unwrap();
        assert_eq!(as_strs(&out), lines);
    }

    #[test]
    fn oversized_token_is_rejected() {
        let long = "x".repeat(crate::sequence::MAX_INSTRUCTION_LEN + 1);
        let err = compile([long.as_str()]).unwrap_err();
        assert_eq!(err, CompileError::InstructionTooLong);
    }

    #[test]
    fn instruction_lines_are_kept_verbatim() {
        // Loop detection trims, but tokens are carried as given.
        let out = compile(["  weighing_open  "]).unwrap();
        assert_eq!(as_strs(&out), ["  weighing_open  "]);
    }
}
