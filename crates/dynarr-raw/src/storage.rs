//! Owning handle to an uninitialized block of `T`-sized slots.
//!
//! This is the only module in the crate that talks to the global allocator.
//! Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;

use crate::error::StorageError;

/// Exclusively owned raw memory sized for `capacity` values of `T`.
///
/// A `RawStorage` never constructs or destroys a `T`. Whoever writes values
/// into its slots is responsible for dropping them before the storage is
/// released; dropping a `RawStorage` that still holds live values leaks
/// those values (their destructors never run) but is not unsound.
///
/// Zero-sized element types never touch the allocator: the block is a
/// dangling pointer and the capacity is recorded as requested.
pub struct RawStorage<T> {
    /// Base of the block. Dangling when no memory is held.
    ptr: NonNull<T>,
    /// Number of slots the block can hold.
    cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: `RawStorage` owns its block exclusively, like `Box<[MaybeUninit<T>]>`.
// Transferring or sharing it across threads is sound whenever `T` itself is.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: see above; `&RawStorage` only hands out `*const T` and `&[MaybeUninit<T>]`.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// An empty handle. Holds no memory and has capacity zero.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    /// Acquire raw memory for `capacity` slots.
    ///
    /// A zero capacity returns the empty handle without allocating.
    ///
    /// # Errors
    ///
    /// [`StorageError::CapacityOverflow`] if the block size would exceed
    /// `isize::MAX` bytes, [`StorageError::AllocationFailed`] if the
    /// allocator returns null.
    pub fn allocate(capacity: usize) -> Result<Self, StorageError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _owns: PhantomData,
            });
        }

        // SAFETY: `layout` has a non-zero size, checked just above.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(StorageError::AllocationFailed {
            requested_bytes: layout.size(),
            align: layout.align(),
        })?;

        Ok(Self {
            ptr,
            cap: capacity,
            _owns: PhantomData,
        })
    }

    /// Release the block and reset to the empty handle.
    ///
    /// No-op on an empty handle. Never runs `T`'s destructor: any values
    /// still written into the slots are forgotten.
    pub fn deallocate(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            if let Ok(layout) = Self::layout_for(self.cap) {
                // SAFETY: `ptr` came from `alloc::alloc` with exactly this
                // layout (same `T`, same capacity) and has not been freed:
                // every path that frees it also resets `cap` to zero.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Exchange blocks with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }

    /// Number of slots the block can hold.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether this handle holds no slots.
    pub fn is_empty(&self) -> bool {
        self.cap == 0
    }

    /// Bytes reserved from the allocator.
    pub fn memory_bytes(&self) -> usize {
        self.cap * mem::size_of::<T>()
    }

    /// Base pointer of the block. Dangling (but aligned) when empty.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable base pointer of the block. Dangling (but aligned) when empty.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// `index == capacity` is allowed and yields the one-past-the-end
    /// pointer. The pointer is only dereferenceable for `index < capacity`,
    /// and only readable if the owner has written a value there.
    pub fn slot_ptr(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap, "slot {index} beyond capacity {}", self.cap);
        self.ptr.as_ptr().wrapping_add(index)
    }

    /// All slots as uninitialized memory.
    ///
    /// Writing through the returned slice is safe; it never drops whatever
    /// the slot previously held.
    pub fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: the block is valid for `cap` slots of `T` (or `T` is
        // zero-sized and any aligned pointer is valid), and `MaybeUninit<T>`
        // has the same layout as `T` with no validity requirement. The
        // `&mut self` borrow makes the slice exclusive.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.cap) }
    }

    fn layout_for(capacity: usize) -> Result<Layout, StorageError> {
        Layout::array::<T>(capacity).map_err(|_| StorageError::CapacityOverflow {
            requested: capacity,
        })
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        self.deallocate();
    }
}

impl<T> fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.ptr)
            .field("capacity", &self.cap)
            .finish()
    }
}
