//! Error types for dataset operations.

use std::str::Utf8Error;

use cdf_dims::DimError;
use cdf_names::NameError;
use cdf_types::{DatasetId, FormatVariant};

/// Errors returned by dataset-facing operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The handle does not name an open dataset.
    #[error("not a valid dataset id: {0}")]
    BadId(DatasetId),

    /// No dimension matches the given id or name.
    #[error("dimension not found: {0}")]
    BadDim(String),

    /// Another dimension already has this name.
    #[error("dimension name already in use: {0:?}")]
    NameInUse(String),

    /// The name breaks a naming rule.
    #[error("invalid name {name:?}: {reason}")]
    NameInvalid { name: String, reason: String },

    /// The name is longer than the format allows.
    #[error("name is {len} bytes, limit is {max}")]
    MaxName { len: usize, max: usize },

    /// The name is not valid UTF-8.
    #[error("name is not valid UTF-8: {0}")]
    Encoding(Utf8Error),

    /// The dataset already holds the maximum number of dimensions.
    #[error("too many dimensions (limit {0})")]
    MaxDims(usize),

    /// The size exceeds what the format variant can record.
    #[error("dimension size {size} exceeds the {format} limit of {max}")]
    DimSize {
        size: u64,
        format: FormatVariant,
        max: u64,
    },

    /// An unlimited dimension already exists.
    #[error("dataset already has an unlimited dimension")]
    Unlimit,

    /// The operation needs define mode.
    #[error("operation not allowed outside define mode")]
    NotInDefine,

    /// The operation is not allowed in define mode.
    #[error("operation not allowed in define mode")]
    InDefine,

    /// The dataset is read-only.
    #[error("dataset is read-only")]
    Perm,

    /// An in-place rename needs more bytes than the stored name holds.
    #[error("new name needs {needed} bytes but the committed name holds only {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Memory could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// Writing the header failed.
    #[error("header sync failed: {0}")]
    Sync(#[from] std::io::Error),
}

impl DatasetError {
    /// The classic library's status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::BadId(_) => -33,
            Self::Perm => -37,
            Self::NotInDefine | Self::CapacityExceeded { .. } => -38,
            Self::InDefine => -39,
            Self::MaxDims(_) => -41,
            Self::NameInUse(_) => -42,
            Self::BadDim(_) => -46,
            Self::MaxName { .. } => -53,
            Self::Unlimit => -54,
            Self::NameInvalid { .. } | Self::Encoding(_) => -59,
            Self::OutOfMemory => -61,
            Self::DimSize { .. } => -63,
            Self::Sync(_) => -68,
        }
    }
}

impl From<NameError> for DatasetError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Encoding(e) => Self::Encoding(e),
            NameError::Invalid { name, reason } => Self::NameInvalid { name, reason },
            NameError::TooLong { len, max } => Self::MaxName { len, max },
            NameError::CapacityExceeded { needed, capacity } => {
                Self::CapacityExceeded { needed, capacity }
            }
            NameError::OutOfMemory => Self::OutOfMemory,
        }
    }
}

impl From<DimError> for DatasetError {
    fn from(err: DimError) -> Self {
        match err {
            DimError::NotFound(id) => Self::BadDim(id.to_string()),
            DimError::NameInUse(name) => Self::NameInUse(name),
            DimError::Unlimit => Self::Unlimit,
            DimError::Encoding(e) => Self::Encoding(e),
            DimError::CapacityExceeded { needed, capacity } => {
                Self::CapacityExceeded { needed, capacity }
            }
            DimError::IdOverflow => Self::MaxDims(cdf_types::MAX_DIMS),
            DimError::OutOfMemory => Self::OutOfMemory,
            DimError::Name(e) => e.into(),
        }
    }
}

/// Convenience alias for dataset results.
pub type DatasetResult<T> = Result<T, DatasetError>;
