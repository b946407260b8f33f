#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vanguard::diff::{encode, patch};

/// Structured input for decoder fuzzing.
#[derive(Arbitrary, Debug)]
struct PatchInput {
    /// Previous full sequence.
    old: Vec<i32>,
    /// Raw diff, usually malformed.
    diff: Vec<i32>,
    /// Sequence to encode against `old`.
    new: Vec<i32>,
}

fuzz_target!(|input: PatchInput| {
    // Arbitrary diffs must decode or fail cleanly, never panic
    if let Ok(out) = patch(&input.old, &input.diff) {
        assert!(out.len() <= input.old.len() + input.diff.len());
    }

    let diff = encode(&input.old, &input.new);
    assert_eq!(patch(&input.old, &diff).ok(), Some(input.new));
});
