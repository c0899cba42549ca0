//! Owning iteration and collection from iterators.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ptr;
use std::slice;

use dynarr_raw::RawStorage;

use crate::array::DynamicArray;

/// Owning iterator over the elements of a [`DynamicArray`].
///
/// Holds the array's storage; slots `[start, end)` are still live.
/// Dropping the iterator drops the unconsumed elements and frees the block.
pub struct IntoIter<T> {
    buf: RawStorage<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is live and inside the block.
        unsafe {
            slice::from_raw_parts(
                self.buf.as_ptr().wrapping_add(self.start),
                self.end - self.start,
            )
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let slot = self.buf.slot_ptr(self.start);
        self.start += 1;
        // SAFETY: the slot was live and is now outside `[start, end)`.
        Some(unsafe { ptr::read(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and is now outside `[start, end)`.
        Some(unsafe { ptr::read(self.buf.slot_ptr(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest =
            ptr::slice_from_raw_parts_mut(self.buf.slot_ptr(self.start), self.end - self.start);
        self.start = self.end;
        // SAFETY: `rest` is the live remainder, now no longer tracked.
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        // `self` is left empty and drops as a no-op.
        let buf = mem::take(&mut self.buf);
        let end = mem::replace(&mut self.len, 0);
        IntoIter { buf, start: 0, end }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // A hint that overflows the buffer still grows by at least doubling.
        if let Some(wanted) = self.len.checked_add(lower) {
            let cap = self.capacity();
            if wanted > cap {
                self.reserve(wanted.max(cap.saturating_mul(2)).max(1));
            }
        }
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}
