//! Error types for the dimension registry.

use std::collections::TryReserveError;
use std::str::Utf8Error;

use cdf_names::NameError;
use cdf_types::DimId;

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimError {
    /// No dimension exists at the given position.
    #[error("dimension not found: {0}")]
    NotFound(DimId),

    /// Another dimension already has this canonical name.
    #[error("dimension name already in use: {0:?}")]
    NameInUse(String),

    /// An unlimited dimension already exists.
    #[error("an unlimited dimension already exists")]
    Unlimit,

    /// The name could not be normalized.
    #[error("name is not valid UTF-8: {0}")]
    Encoding(Utf8Error),

    /// An in-place rename needs more bytes than the stored name holds.
    #[error("new name needs {needed} bytes but the stored name holds only {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// The position counter cannot represent another dimension.
    #[error("dimension ids exhausted")]
    IdOverflow,

    /// Memory for the array, index, or a copied name could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// Any other name failure.
    #[error("name error: {0}")]
    Name(NameError),
}

impl From<NameError> for DimError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Encoding(e) => Self::Encoding(e),
            NameError::CapacityExceeded { needed, capacity } => {
                Self::CapacityExceeded { needed, capacity }
            }
            NameError::OutOfMemory => Self::OutOfMemory,
            other => Self::Name(other),
        }
    }
}

impl From<TryReserveError> for DimError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// Convenience alias for registry results.
pub type DimResult<T> = Result<T, DimError>;
