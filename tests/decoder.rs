//! Property and fixture tests for the run-length diff decoder.
//!
//! Run with: cargo test --release decoder

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use vanguard::DecodeError;
use vanguard::diff::{encode, patch};

#[test]
fn fixture_copy_replace_copy() {
    let old = [1, 2, 3, 4, 5];
    assert_eq!(patch(&old, &[2, 1, 7, 2]).unwrap(), [1, 2, 7, 4, 5]);
}

#[test]
fn fixture_zero_replace_then_second_phase() {
    let old = [1, 2, 3, 4, 5];
    // copy 2, replace 0, copy 1, replace 2 literals
    assert_eq!(patch(&old, &[2, 0, 1, 2, 9, 2]).unwrap(), [1, 2, 3, 9, 2]);
}

#[test]
fn fixture_replace_count_past_the_end() {
    let old = [1, 2, 3, 4, 5];
    // The 9 is a replace count with only one literal behind it
    assert_eq!(
        patch(&old, &[2, 0, 1, 9, 2]),
        Err(DecodeError::ReplaceOverrun {
            offset: 3,
            count: 9,
            available: 5,
        })
    );
}

#[test]
fn fixture_growing_sequence() {
    // First tick of a match: nothing to copy from
    assert_eq!(patch(&[], &[0, 3, 4, 5, 6]).unwrap(), [4, 5, 6]);
}

#[test]
fn fixture_shrinking_sequence() {
    // Cities list loses its tail
    assert_eq!(patch(&[10, 20, 30], &[1]).unwrap(), [10]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A single copy of the whole sequence changes nothing.
    #[test]
    fn prop_no_change_identity(old in prop::collection::vec(any::<i32>(), 0..200)) {
        let len = i32::try_from(old.len()).unwrap();
        prop_assert_eq!(patch(&old, &[len]).unwrap(), old);
    }

    /// Encoding then patching reproduces the new sequence.
    #[test]
    fn prop_patch_inverts_encode(
        old in prop::collection::vec(-4i32..60, 0..120),
        new in prop::collection::vec(-4i32..60, 0..120),
    ) {
        prop_assert_eq!(patch(&old, &encode(&old, &new)).unwrap(), new);
    }

    /// Small edits give diffs much shorter than the sequence.
    #[test]
    fn prop_single_edit_is_compact(
        old in prop::collection::vec(0i32..100, 10..200),
        index in any::<prop::sample::Index>(),
        value in 100i32..200,
    ) {
        let mut new = old.clone();
        new[index.index(old.len())] = value;
        prop_assert!(encode(&old, &new).len() <= 5);
    }

    /// Arbitrary input never panics; it decodes or reports an error.
    #[test]
    fn prop_arbitrary_diff_never_panics(
        old in prop::collection::vec(any::<i32>(), 0..50),
        diff in prop::collection::vec(-5i32..60, 0..60),
    ) {
        let _ = patch(&old, &diff);
    }
}
