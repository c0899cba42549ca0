//! The [`DynamicArray`] type and its lifecycle: construction, copy and move
//! semantics, assignment, and destruction.
//!
//! Growth lives in [`crate::growth`], positional edits in
//! [`crate::positional`], owning iteration in [`crate::iter`].

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use dynarr_raw::{RawStorage, StorageError};

/// A growable contiguous array over explicitly managed [`RawStorage`].
///
/// Slots `[0, len)` of the storage hold live values; slots
/// `[len, capacity)` are uninitialized. Every operation preserves
/// `len <= capacity`, including when an element's `Clone` or `Default`
/// panics part-way through.
///
/// Indexing, slicing and borrowed iteration come from `Deref<Target = [T]>`.
/// References into the array cannot outlive an operation that reallocates
/// or shifts elements; the borrow checker enforces this. Indices held across
/// [`insert`](Self::insert) or [`erase`](Self::erase) name positions, not
/// elements.
pub struct DynamicArray<T> {
    pub(crate) buf: RawStorage<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawStorage::new(),
            len: 0,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through
    /// [`std::alloc::handle_alloc_error`] if the allocator fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self {
            buf: RawStorage::allocate(capacity)?,
            len: 0,
        })
    }

    /// Move-construct: take `other`'s storage and elements, leaving it empty
    /// with capacity zero. Constant time.
    pub fn take(other: &mut Self) -> Self {
        let mut out = Self::new();
        out.move_assign(other);
        out
    }

    /// Move-assign: exchange storage and elements with `other`.
    ///
    /// The previous contents of `self` end up in `other` and are dropped
    /// whenever `other` is. Constant time, never fails.
    pub fn move_assign(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current storage holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes of storage reserved, live or not.
    pub fn memory_bytes(&self) -> usize {
        self.buf.memory_bytes()
    }

    /// Position of the first element. Always `0`.
    pub fn begin(&self) -> usize {
        0
    }

    /// One past the position of the last element, i.e. [`len`](Self::len).
    pub fn end(&self) -> usize {
        self.len
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized and the block is valid for
        // at least `len` slots; an empty array has a dangling aligned pointer.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` makes the borrow exclusive.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Construct elements into `[len, new_len)` one slot at a time.
    ///
    /// The length is committed per element, so if `make` panics the
    /// elements built so far stay live and counted. Capacity must already
    /// cover `new_len`.
    pub(crate) fn construct_tail(&mut self, new_len: usize, mut make: impl FnMut(usize) -> T) {
        debug_assert!(new_len <= self.buf.capacity());
        let Self { buf, len } = self;
        let slots = buf.slots_mut();
        let mut guard = SetLenOnDrop::new(len);
        while guard.local_len < new_len {
            let index = guard.local_len;
            slots[index].write(make(index));
            guard.local_len += 1;
        }
    }

    /// Drop the elements in `[new_len, len)`. No-op if `new_len >= len`.
    pub(crate) fn destroy_tail(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.buf.slot_ptr(new_len), self.len - new_len);
        // Shrink first: a panicking destructor must not cause a double drop.
        self.len = new_len;
        // SAFETY: the slots in `tail` were live and are no longer counted,
        // so nothing else will read or drop them.
        unsafe { ptr::drop_in_place(tail) };
    }
}

impl<T: Default> DynamicArray<T> {
    /// An array of `len` default values, with capacity exactly `len`.
    ///
    /// If `T::default()` panics, the values built so far are dropped and
    /// the storage released before the panic propagates.
    pub fn with_len(len: usize) -> Self {
        Self::try_with_len(len).unwrap_or_else(|e| e.escalate())
    }

    /// Fallible form of [`with_len`](Self::with_len).
    pub fn try_with_len(len: usize) -> Result<Self, StorageError> {
        let mut arr = Self::try_with_capacity(len)?;
        arr.construct_tail(len, |_| T::default());
        Ok(arr)
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Copy-construct with capacity exactly `self.len()`.
    ///
    /// Strong guarantee: if an element's `clone` panics, the partial copy
    /// is dropped and its storage released; `self` is never touched.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        let mut arr = Self::try_with_capacity(self.len)?;
        let src = self.as_slice();
        arr.construct_tail(src.len(), |i| src[i].clone());
        Ok(arr)
    }

    /// Copy-assign from `other`.
    ///
    /// When `other` does not fit in the current capacity, a full copy is
    /// built first and swapped in: on error or panic `self` is unchanged.
    ///
    /// Otherwise the existing storage is reused: the shared prefix is
    /// reassigned with [`Clone::clone_from`], then the excess tail is
    /// dropped or the missing tail cloned into spare capacity. This branch
    /// only gives the weak guarantee. A panicking `clone_from` or `clone`
    /// leaves some elements already reassigned and the length counting
    /// exactly the live slots.
    pub fn try_assign_from(&mut self, other: &Self) -> Result<(), StorageError> {
        if other.len > self.capacity() {
            let mut fresh = other.try_clone()?;
            self.move_assign(&mut fresh);
            return Ok(());
        }

        let src = other.as_slice();
        let shared = self.len.min(src.len());
        for (dst, s) in self.as_mut_slice()[..shared].iter_mut().zip(&src[..shared]) {
            dst.clone_from(s);
        }
        if self.len > src.len() {
            self.destroy_tail(src.len());
        } else {
            self.construct_tail(src.len(), |i| src[i].clone());
        }
        Ok(())
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.escalate())
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_assign_from(source).unwrap_or_else(|e| e.escalate())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.destroy_tail(0);
        // `buf` releases the block when it is dropped after this.
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

/// Writes a locally tracked length back on drop, including during unwinding.
struct SetLenOnDrop<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
    fn new(len: &'a mut usize) -> Self {
        let local_len = *len;
        Self { len, local_len }
    }
}

impl Drop for SetLenOnDrop<'_> {
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty_and_unallocated() {
        let arr = DynamicArray::<i32>::new();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 0);
        assert_eq!(arr.memory_bytes(), 0);
        assert!(arr.is_empty());
        assert_eq!(arr.begin(), arr.end());
    }

    #[test]
    fn with_len_default_constructs() {
        let arr = DynamicArray::<String>::with_len(3);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.capacity(), 3);
        assert!(arr.iter().all(String::is_empty));
    }

    #[test]
    fn with_capacity_has_no_elements() {
        let arr = DynamicArray::<u8>::with_capacity(10);
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 10);
    }

    #[test]
    fn clone_has_tight_capacity() {
        let mut arr = DynamicArray::with_capacity(16);
        arr.push_back(1);
        arr.push_back(2);
        let copy = arr.clone();
        assert_eq!(copy.capacity(), 2);
        assert_eq!(copy, arr);
    }

    #[test]
    fn take_empties_source() {
        let mut src: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        let dst = DynamicArray::take(&mut src);
        assert_eq!(dst.as_slice(), &[1, 2, 3]);
        assert_eq!(src.len(), 0);
        assert_eq!(src.capacity(), 0);
    }

    #[test]
    fn move_assign_exchanges_contents() {
        let mut a: DynamicArray<i32> = [1, 2].into_iter().collect();
        let mut b: DynamicArray<i32> = [7, 8, 9].into_iter().collect();
        a.move_assign(&mut b);
        assert_eq!(a.as_slice(), &[7, 8, 9]);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn assign_from_larger_reallocates() {
        let mut dst: DynamicArray<i32> = [1].into_iter().collect();
        let src: DynamicArray<i32> = [4, 5, 6].into_iter().collect();
        dst.clone_from(&src);
        assert_eq!(dst.as_slice(), &[4, 5, 6]);
        assert_eq!(dst.capacity(), 3);
    }

    #[test]
    fn assign_from_shorter_reuses_storage() {
        let mut dst: DynamicArray<i32> = (0..8).collect();
        let cap = dst.capacity();
        let base = dst.as_ptr();
        let src: DynamicArray<i32> = [42, 43].into_iter().collect();
        dst.clone_from(&src);
        assert_eq!(dst.as_slice(), &[42, 43]);
        assert_eq!(dst.capacity(), cap);
        assert_eq!(dst.as_ptr(), base);
    }

    #[test]
    fn assign_from_grows_within_capacity() {
        let mut dst = DynamicArray::with_capacity(8);
        dst.push_back(String::from("a"));
        let src: DynamicArray<String> = ["x", "y", "z"].into_iter().map(String::from).collect();
        dst.clone_from(&src);
        assert_eq!(dst.len(), 3);
        assert_eq!(dst.capacity(), 8);
        assert_eq!(dst[0], "x");
        assert_eq!(dst[2], "z");
    }

    #[test]
    fn debug_lists_elements() {
        let arr: DynamicArray<i32> = [1, 2].into_iter().collect();
        assert_eq!(format!("{arr:?}"), "[1, 2]");
    }

    #[test]
    fn zero_sized_elements() {
        let mut arr = DynamicArray::<()>::with_len(5);
        assert_eq!(arr.len(), 5);
        arr.push_back(());
        assert_eq!(arr.len(), 6);
        assert_eq!(arr.memory_bytes(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clone_is_deep(values in proptest::collection::vec(any::<i64>(), 0..64)) {
                let original: DynamicArray<i64> = values.iter().copied().collect();
                let mut copy = original.clone();
                prop_assert_eq!(copy.as_slice(), values.as_slice());
                for v in copy.iter_mut() {
                    *v = v.wrapping_add(1);
                }
                prop_assert_eq!(original.as_slice(), values.as_slice());
            }

            #[test]
            fn assign_from_matches_source(
                dst in proptest::collection::vec(any::<u16>(), 0..32),
                src in proptest::collection::vec(any::<u16>(), 0..32),
            ) {
                let mut a: DynamicArray<u16> = dst.into_iter().collect();
                let b: DynamicArray<u16> = src.iter().copied().collect();
                let cap_before = a.capacity();
                a.clone_from(&b);
                prop_assert_eq!(a.as_slice(), src.as_slice());
                if src.len() <= cap_before {
                    prop_assert_eq!(a.capacity(), cap_before);
                }
            }
        }
    }
}
