//! Insertion and removal at arbitrary positions.
//!
//! Both directions shift the tail with a single overlapping `ptr::copy`.
//! Rust moves are bitwise, so no element code runs while shifting.

#![allow(unsafe_code)]

use std::ptr;

use dynarr_raw::StorageError;

use crate::array::DynamicArray;

impl<T> DynamicArray<T> {
    /// Insert `value` before position `pos` and return a reference to it.
    ///
    /// `pos == len()` appends. Elements at `[pos, len)` move one slot to the
    /// right. Grows per the doubling policy when full.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) -> &mut T {
        self.try_insert(pos, value).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`insert`](Self::insert). On error `value` is
    /// dropped and the array is unchanged.
    pub fn try_insert(&mut self, pos: usize, value: T) -> Result<&mut T, StorageError> {
        self.try_emplace(pos, || value)
    }

    /// Construct an element from `make` before position `pos`.
    ///
    /// `make` runs before anything is moved, so a panic in it leaves the
    /// array exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn emplace(&mut self, pos: usize, make: impl FnOnce() -> T) -> &mut T {
        self.try_emplace(pos, make).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`emplace`](Self::emplace).
    pub fn try_emplace(
        &mut self,
        pos: usize,
        make: impl FnOnce() -> T,
    ) -> Result<&mut T, StorageError> {
        let len = self.len;
        assert!(
            pos <= len,
            "insertion position (is {pos}) should be <= len (is {len})"
        );
        let value = make();
        self.grow_for_append()?;

        let slot = self.buf.slot_ptr(pos);
        // SAFETY: after growth `capacity > len`, so `[pos + 1, len + 1)` is
        // inside the block. `[pos, len)` is live; `ptr::copy` handles the
        // overlap. Slot `pos` is then logically uninitialized and is written
        // before the length is committed, with nothing in between that can
        // panic.
        unsafe {
            ptr::copy(slot, slot.add(1), len - pos);
            ptr::write(slot, value);
            self.len = len + 1;
            Ok(&mut *slot)
        }
    }

    /// Drop the element at `pos` and close the gap.
    ///
    /// Returns the position of the element that followed the removed one:
    /// `pos` itself, which equals `len()` when the last element was erased.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> usize {
        drop(self.remove(pos));
        pos
    }

    /// Remove the element at `pos` and return it, shifting the tail left.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> T {
        let len = self.len;
        assert!(pos < len, "removal position (is {pos}) should be < len (is {len})");

        let slot = self.buf.slot_ptr(pos);
        // SAFETY: `pos < len`, so slot `pos` is live and `[pos + 1, len)` is
        // inside the live prefix. Reading the value out leaves a hole that
        // the copy closes; the length shrinks before anything can panic.
        unsafe {
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - pos - 1);
            self.len = len - 1;
            value
        }
    }
}
