//! Run-length diff decoding for the map and city channels.
//!
//! A diff is a sequence of two-entry phases. Each phase starts with a copy
//! count `c` (take the next `c` entries of the previous sequence) followed by
//! a replace count `r` and `r` literal entries. Runs are consumed strictly
//! left to right, so the output length is a function of both inputs.
//!
//! ```text
//! old  = [1, 2, 3, 4, 5]
//! diff = [2, 1, 7, 2]
//!         │  │  │  └ copy 2 more: [4, 5]
//!         │  │  └ literal 7
//!         │  └ replace 1
//!         └ copy 2: [1, 2]
//! out  = [1, 2, 7, 4, 5]
//! ```

use crate::error::DecodeError;

/// Apply `diff` to the previous full sequence `old`.
///
/// An empty diff yields an empty sequence; callers keep the running `old`
/// themselves.
///
/// # Errors
///
/// Returns a [`DecodeError`] if a count is negative or a run reaches past the
/// end of `old` or `diff`. Runs are never clamped.
pub fn patch(old: &[i32], diff: &[i32]) -> Result<Vec<i32>, DecodeError> {
    let mut out = Vec::with_capacity(old.len());
    let mut cursor = 0;

    while cursor < diff.len() {
        let copy = run_length(diff, cursor)?;
        if copy > 0 {
            let start = out.len();
            let run = old
                .get(start..start + copy)
                .ok_or(DecodeError::CopyOverrun {
                    position: start,
                    count: copy,
                    available: old.len(),
                })?;
            out.extend_from_slice(run);
        }
        cursor += 1;

        if cursor < diff.len() {
            let replace = run_length(diff, cursor)?;
            if replace > 0 {
                let literals = diff.get(cursor + 1..cursor + 1 + replace).ok_or(
                    DecodeError::ReplaceOverrun {
                        offset: cursor,
                        count: replace,
                        available: diff.len(),
                    },
                )?;
                out.extend_from_slice(literals);
                cursor += replace;
            }
        }
        cursor += 1;
    }

    Ok(out)
}

/// Produce a diff that turns `old` into `new` under [`patch`].
///
/// Unchanged stretches become copy runs and everything else is sent as
/// literals. Entries of `new` past the end of `old` are always literals.
#[must_use]
pub fn encode(old: &[i32], new: &[i32]) -> Vec<i32> {
    let mut diff = Vec::new();
    let mut i = 0;

    while i < new.len() {
        let copy_start = i;
        while i < new.len() && old.get(i) == Some(&new[i]) {
            i += 1;
        }
        diff.push(count(i - copy_start));

        let replace_start = i;
        while i < new.len() && old.get(i) != Some(&new[i]) {
            i += 1;
        }
        if i > replace_start {
            diff.push(count(i - replace_start));
            diff.extend_from_slice(&new[replace_start..i]);
        }
    }

    diff
}

/// Read a non-negative count at `offset`.
fn run_length(diff: &[i32], offset: usize) -> Result<usize, DecodeError> {
    let raw = diff[offset];
    usize::try_from(raw).map_err(|_| DecodeError::NegativeCount { offset, count: raw })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn count(n: usize) -> i32 {
    n as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_copy_everything() {
        let old = [4, 5, 6];
        assert_eq!(patch(&old, &[3]).unwrap(), vec![4, 5, 6]);
        assert_eq!(patch(&old, &[3, 0]).unwrap(), vec![4, 5, 6]);
    }

    #[test]
    fn test_patch_replace_in_middle() {
        let old = [1, 2, 3, 4, 5];
        assert_eq!(patch(&old, &[2, 1, 7, 2]).unwrap(), vec![1, 2, 7, 4, 5]);
    }

    #[test]
    fn test_patch_two_phases() {
        // copy [1, 2], replace none, copy [3], replace with [9, 2]
        let old = [1, 2, 3, 4, 5];
        assert_eq!(patch(&old, &[2, 0, 1, 2, 9, 2]).unwrap(), vec![1, 2, 3, 9, 2]);
    }

    #[test]
    fn test_patch_from_empty() {
        assert_eq!(patch(&[], &[0, 3, 10, 11, 12]).unwrap(), vec![10, 11, 12]);
    }

    #[test]
    fn test_patch_empty_diff() {
        assert!(patch(&[1, 2, 3], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_patch_grows_sequence() {
        let old = [1, 2];
        assert_eq!(patch(&old, &[2, 2, 3, 4]).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_patch_copy_overrun() {
        let err = patch(&[1, 2], &[3]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CopyOverrun {
                position: 0,
                count: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_patch_replace_overrun() {
        let err = patch(&[], &[0, 4, 1, 2]).unwrap_err();
        assert!(matches!(err, DecodeError::ReplaceOverrun { count: 4, .. }));
    }

    #[test]
    fn test_patch_negative_count() {
        let err = patch(&[1], &[-1]).unwrap_err();
        assert_eq!(err, DecodeError::NegativeCount { offset: 0, count: -1 });
    }

    #[test]
    fn test_encode_unchanged() {
        let old = [3, 1, 4, 1, 5];
        assert_eq!(encode(&old, &old), vec![5]);
    }

    #[test]
    fn test_encode_matches_patch() {
        let old = [0, 0, 1, -1, -1, 7];
        let new = [0, 2, 1, -1, 3, 7, 8];
        let diff = encode(&old, &new);
        assert_eq!(patch(&old, &diff).unwrap(), new.to_vec());
    }

    #[test]
    fn test_encode_shrinks() {
        let old = [1, 2, 3, 4];
        let new = [1, 2];
        assert_eq!(encode(&old, &new), vec![2]);
    }
}
