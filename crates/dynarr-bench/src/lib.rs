//! Benchmark workloads for the dynarr dynamic array.
//!
//! - [`filled`]: an array of `len` sequential values
//! - [`edit_script`]: a deterministic sequence of insert/erase positions
//!   generated from a seeded ChaCha8 stream

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr::DynamicArray;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of an edit script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Insert a value before this position.
    Insert(usize),
    /// Erase the element at this position.
    Erase(usize),
}

/// Build an array holding `0..len`.
pub fn filled(len: usize) -> DynamicArray<u64> {
    (0..len as u64).collect()
}

/// Generate `steps` edits against an array that starts at `start_len`
/// elements.
///
/// Every position is valid for the length the array has when the edit is
/// applied. Erases are only emitted while the array is non-empty.
pub fn edit_script(seed: u64, start_len: usize, steps: usize) -> Vec<Edit> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut len = start_len;
    let mut script = Vec::with_capacity(steps);

    for _ in 0..steps {
        let roll = rng.next_u64();
        if len == 0 || roll & 1 == 0 {
            script.push(Edit::Insert((roll >> 1) as usize % (len + 1)));
            len += 1;
        } else {
            script.push(Edit::Erase((roll >> 1) as usize % len));
            len -= 1;
        }
    }

    script
}

/// Apply `script` to `arr`, inserting `fill` for every insert.
pub fn apply(arr: &mut DynamicArray<u64>, script: &[Edit], fill: u64) {
    for edit in script {
        match *edit {
            Edit::Insert(pos) => {
                arr.insert(pos, fill);
            }
            Edit::Erase(pos) => {
                arr.erase(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_is_sequential() {
        let arr = filled(5);
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn edit_script_deterministic() {
        assert_eq!(edit_script(42, 10, 100), edit_script(42, 10, 100));
    }

    #[test]
    fn edit_script_positions_stay_in_range() {
        let script = edit_script(7, 0, 500);
        let mut arr = DynamicArray::new();
        apply(&mut arr, &script, 1);
        let inserts = script.iter().filter(|e| matches!(e, Edit::Insert(_))).count();
        assert_eq!(arr.len(), inserts - (script.len() - inserts));
    }
}
