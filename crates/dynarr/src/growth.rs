//! Capacity control and appending.
//!
//! [`DynamicArray::try_reserve`] is the single reallocation path: every
//! growing operation funnels through it. Appends that find the array full
//! grow to `max(1, 2 * capacity)`, which keeps a run of appends amortized
//! O(1) each.

#![allow(unsafe_code)]

use std::ptr;

use dynarr_raw::{RawStorage, StorageError};

use crate::array::DynamicArray;

impl<T> DynamicArray<T> {
    /// Ensure capacity for at least `capacity` elements in total.
    ///
    /// Unlike `Vec::reserve`, the argument is an absolute capacity, not an
    /// additional count. A no-op when `capacity <= self.capacity()`.
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`reserve`](Self::reserve).
    ///
    /// Allocates a block of exactly `capacity` slots, moves the live
    /// elements across in index order and releases the old block. On error
    /// the array is untouched: the old block stays in place until the new
    /// one is fully populated.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        if capacity <= self.buf.capacity() {
            return Ok(());
        }
        let mut fresh = RawStorage::allocate(capacity)?;
        // SAFETY: `fresh` is a distinct block with room for `capacity > len`
        // slots; the source holds `len` live values. Moves are bitwise, so
        // after the copy the old slots are treated as uninitialized and the
        // old block is released without dropping anything.
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len) };
        self.buf.swap(&mut fresh);
        Ok(())
    }

    /// Make room for one more element, doubling capacity if full.
    pub(crate) fn grow_for_append(&mut self) -> Result<(), StorageError> {
        let cap = self.buf.capacity();
        if self.len < cap {
            return Ok(());
        }
        let new_cap = if cap == 0 {
            1
        } else {
            cap.checked_mul(2)
                .ok_or(StorageError::CapacityOverflow { requested: cap })?
        };
        self.try_reserve(new_cap)
    }

    /// Append `value`, growing per the doubling policy.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`push_back`](Self::push_back). On error `value`
    /// is dropped and the array is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), StorageError> {
        self.try_emplace_back(|| value).map(|_| ())
    }

    /// Construct a new last element in place from `make` and return it.
    ///
    /// Capacity is ensured before `make` runs. If `make` panics the array
    /// keeps its elements; only the growth (if any) remains.
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> &mut T {
        self.try_emplace_back(make).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`emplace_back`](Self::emplace_back).
    pub fn try_emplace_back(&mut self, make: impl FnOnce() -> T) -> Result<&mut T, StorageError> {
        self.grow_for_append()?;
        let value = make();
        let index = self.len;
        self.len += 1;
        Ok(self.buf.slots_mut()[index].write(value))
    }

    /// Drop the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) {
        assert!(self.len > 0, "pop_back on an empty DynamicArray");
        self.destroy_tail(self.len - 1);
    }

    /// Remove the last element and return it, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is no longer counted, so reading
        // it out transfers ownership without a double drop.
        Some(unsafe { ptr::read(self.buf.slot_ptr(self.len)) })
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.destroy_tail(0);
    }
}

impl<T: Default> DynamicArray<T> {
    /// Set the length to `len`.
    ///
    /// Grows capacity to exactly `len` if needed, then default-constructs
    /// the new tail or drops the excess one. Capacity never shrinks. If
    /// `T::default()` panics, the elements built so far stay in the array.
    pub fn resize(&mut self, len: usize) {
        self.try_resize(len).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`resize`](Self::resize).
    pub fn try_resize(&mut self, len: usize) -> Result<(), StorageError> {
        if len > self.buf.capacity() {
            self.try_reserve(len)?;
        }
        if len > self.len {
            self.construct_tail(len, |_| T::default());
        } else {
            self.destroy_tail(len);
        }
        Ok(())
    }
}
