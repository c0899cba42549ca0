//! Raw slot storage for the `dynarr` dynamic array.
//!
//! Separates memory acquisition from object lifetime: a [`RawStorage`] owns
//! an allocated-but-uninitialized block sized for N values of `T` and knows
//! nothing about which slots hold live values. Constructing, moving and
//! dropping elements is the owner's job (see the `dynarr` crate).
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T> (dynarr)
//! ├── len: usize             live prefix [0, len)
//! └── RawStorage<T>          this crate
//!     ├── ptr: NonNull<T>    dangling when capacity == 0
//!     └── cap: usize         slots, not live values
//! ```
//!
//! # Safety boundary
//!
//! All interaction with the global allocator lives in `storage.rs`, the only
//! module allowed to contain `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod storage;

// Public re-exports for the primary API surface.
pub use error::StorageError;
pub use storage::RawStorage;
