//! Error type shared by every container in this module.
//!
//! Missing keys are not an error: map lookups return `Option`.

use thiserror::Error;

/// Failure signals raised by container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// pop/dequeue/peek/extract on a container with no elements
    #[error("collection is empty")]
    EmptyCollection,

    /// Indexed access outside the valid range
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the container at the time of the call
        len: usize,
    },
}
