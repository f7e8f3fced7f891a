//! Foundation types for classic-format datasets.
//!
//! This crate provides the small value types shared by every other crate in
//! the workspace: the on-disk format variants and their size limits, the
//! dimension size with its unlimited sentinel, and the integer identifiers
//! handed out to callers.
//!
//! # Key Types
//!
//! - [`FormatVariant`]: CDF-1 / CDF-2 / CDF-5 and their dimension bounds
//! - [`DimSize`]: A dimension length, where `0` means unlimited
//! - [`DimId`]: Stable, append-order dimension identifier
//! - [`DatasetId`]: Opaque handle naming an open dataset

pub mod error;
pub mod format;
pub mod ids;
pub mod limits;
pub mod size;

pub use error::TypeError;
pub use format::FormatVariant;
pub use ids::{DatasetId, DimId};
pub use limits::{ARRAY_GROWBY, MAX_DIMS, MAX_NAME};
pub use size::DimSize;
