//! Storage-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while acquiring raw slot storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The requested slot count cannot be represented as an allocation:
    /// its byte size exceeds `isize::MAX`, or growing the capacity
    /// overflowed `usize`.
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
    },
    /// The global allocator could not satisfy the request.
    AllocationFailed {
        /// Number of bytes requested.
        requested_bytes: usize,
        /// Alignment of the requested block.
        align: usize,
    },
}

impl StorageError {
    /// Convert this error into the behaviour of an infallible operation.
    ///
    /// Allocation failure is reported through
    /// [`std::alloc::handle_alloc_error`], capacity overflow panics. This
    /// mirrors how the standard collections treat the same conditions.
    pub fn escalate(self) -> ! {
        match self {
            Self::CapacityOverflow { .. } => panic!("capacity overflow"),
            Self::AllocationFailed {
                requested_bytes,
                align,
            } => match std::alloc::Layout::from_size_align(requested_bytes, align) {
                Ok(layout) => std::alloc::handle_alloc_error(layout),
                Err(_) => panic!("allocation failed: requested {requested_bytes} bytes"),
            },
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots requested")
            }
            Self::AllocationFailed {
                requested_bytes,
                align,
            } => {
                write!(
                    f,
                    "allocation failed: requested {requested_bytes} bytes (align {align})"
                )
            }
        }
    }
}

impl Error for StorageError {}
