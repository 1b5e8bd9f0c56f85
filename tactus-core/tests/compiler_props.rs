//! Property tests for the sequence compiler

use proptest::prelude::*;

use tactus_core::sequence::{compile, CompiledSequence, FINISHED};

proptest! {
    /// Inputs without loop syntax compile to themselves.
    #[test]
    fn loop_free_inputs_round_trip(lines in proptest::collection::vec("[a-z ]{1,24}", 0..16)) {
        let out = compile(lines.iter().map(String::as_str)).unwrap();
        let got: Vec<&str> = out.iter().map(|s| s.as_str()).collect();
        let want: Vec<&str> = lines.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }

    /// Same input, same output - including the failure cases.
    #[test]
    fn compilation_is_deterministic(lines in proptest::collection::vec("[a-z0-9_]{1,16}", 0..12)) {
        let first = compile(lines.iter().map(String::as_str));
        let second = compile(lines.iter().map(String::as_str));
        prop_assert_eq!(first, second);
    }

    /// Sealing any successful compilation ends in the terminal marker.
    #[test]
    fn sealed_sequences_end_in_finished(lines in proptest::collection::vec("[a-z ]{1,24}", 0..16)) {
        let sealed = CompiledSequence::seal(compile(lines.iter().map(String::as_str)).unwrap());
        prop_assert!(sealed.len() >= 1);
        prop_assert_eq!(sealed.get(sealed.len() - 1).unwrap().as_str(), FINISHED);
    }
}
