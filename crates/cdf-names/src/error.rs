//! Error types for name operations.

use std::collections::TryReserveError;
use std::str::Utf8Error;

use thiserror::Error;

/// Errors that can occur while validating, normalizing, or storing a name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The name is not valid UTF-8 and cannot be normalized.
    #[error("name is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    /// The name breaks a naming rule.
    #[error("invalid name {name:?}: {reason}")]
    Invalid { name: String, reason: String },

    /// The name is longer than the format allows.
    #[error("name is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// An in-place rewrite needs more bytes than the stored name holds.
    #[error("name needs {needed} bytes but the stored name holds only {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Memory for the name could not be allocated.
    #[error("out of memory storing name")]
    OutOfMemory,
}

impl From<TryReserveError> for NameError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// Convenience type alias for name operations.
pub type Result<T> = std::result::Result<T, NameError>;
