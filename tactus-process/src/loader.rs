//! Sequence loading
//!
//! Reads a process-definition file, filters comments, compiles and seals
//! the result. Falls back to the built-in default sequence when the file
//! is unavailable, and to the minimal safe sequence when compilation
//! fails - the process never constructs a controller with zero
//! executable steps.

use std::fs;
use std::path::Path;

use tactus_core::sequence::{compile, CompiledSequence};
use tracing::{info, warn};

/// Built-in default sequence used when no file is available
///
/// Default policy, not a contract: the loader seals whatever it loads,
/// so the trailing terminal marker here is informative rather than load-
/// bearing.
pub const DEFAULT_SEQUENCE: &[&str] = &[
    "slider_init cobotta_init weighing_init plc_init",
    "slider_shelf_1 plc_buzz",
    "weighing_open slider_weight_pos cobotta_test",
    "slider_init cobotta_init weighing_init plc_init",
    "finished",
];

/// Split raw text into instruction lines
///
/// Blank lines and `#` comments are dropped, the rest are trimmed.
pub fn filter_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Compile and seal raw lines, substituting the safe sequence on failure
pub fn compile_or_safe(lines: &[String]) -> CompiledSequence {
    match compile(lines.iter().map(String::as_str)) {
        Ok(steps) => CompiledSequence::seal(steps),
        Err(e) => {
            warn!(error = ?e, "sequence compile failed, substituting safe sequence");
            CompiledSequence::safe_fallback()
        }
    }
}

/// Load a sealed sequence from `path`
pub fn load_sequence(path: &Path) -> CompiledSequence {
    let lines = match fs::read_to_string(path) {
        Ok(text) => {
            info!(path = %path.display(), "loading process sequence");
            filter_lines(&text)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "sequence file unavailable, using built-in default"
            );
            DEFAULT_SEQUENCE.iter().map(|s| (*s).to_owned()).collect()
        }
    };
    compile_or_safe(&lines)
}
