//! A growable contiguous array built on explicitly managed raw storage.
//!
//! [`DynamicArray`] keeps memory acquisition and element lifetime apart:
//! its [`RawStorage`] only hands out uninitialized slots, while the array
//! decides which slots are live and when values are written, moved or
//! dropped.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T>
//! ├── array.rs       construction, clone/clone_from, take/move_assign, Drop
//! ├── growth.rs      reserve (sole reallocation path), resize, push/emplace/pop
//! ├── positional.rs  insert/emplace at a position, erase/remove
//! ├── iter.rs        IntoIter, FromIterator, Extend
//! └── RawStorage<T>  (dynarr-raw) allocation only
//! ```
//!
//! # Growth
//!
//! An append into a full array grows capacity to `max(1, 2 * capacity)`:
//! 0 → 1 → 2 → 4 → 8. [`DynamicArray::reserve`] and
//! [`DynamicArray::resize`] grow to exactly the requested size.
//!
//! # Failure behaviour
//!
//! - Allocation failure: `try_*` methods return [`StorageError`] and leave
//!   the array unchanged; the plain methods escalate like `Vec` does.
//! - A panicking `Clone` during `clone()` or `Default` during `with_len()`
//!   discards the partial result (strong guarantee).
//! - A panicking `Clone` during `clone_from()` into existing capacity
//!   leaves a partially assigned array with a consistent length (weak
//!   guarantee).
//! - Out-of-range positions panic.
//!
//! ```
//! use dynarr::DynamicArray;
//!
//! let mut arr = DynamicArray::new();
//! arr.push_back(1);
//! arr.push_back(2);
//! arr.push_back(3);
//! assert_eq!(arr.capacity(), 4);
//!
//! arr.insert(1, 10);
//! assert_eq!(arr.as_slice(), &[1, 10, 2, 3]);
//! arr.erase(0);
//! arr.pop_back();
//! assert_eq!(arr.as_slice(), &[10, 2]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod growth;
pub mod iter;
pub mod positional;

// Public re-exports for the primary API surface.
pub use array::DynamicArray;
pub use dynarr_raw::{RawStorage, StorageError};
pub use iter::IntoIter;

/// Raw slot storage (`dynarr-raw`).
pub use dynarr_raw as raw;
