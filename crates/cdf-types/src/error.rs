use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown format variant: {0}")]
    UnknownFormat(String),

    #[error("unknown format version byte: {0}")]
    UnknownVersion(u8),
}
