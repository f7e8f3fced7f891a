//! Dataset-facing dimension operations for classic-format datasets.
//!
//! This crate is the layer callers talk to. Each operation names a dataset
//! by its [`DatasetId`](cdf_types::DatasetId), resolves it through a
//! [`DatasetTable`], checks the dataset's mode and permissions, and then
//! works on the dataset's [`DimArray`](cdf_dims::DimArray).
//!
//! # Design Rules
//!
//! 1. Dimensions are created only in define mode.
//! 2. Outside define mode a rename rewrites the name in place and may not
//!    grow it; the header is then marked dirty and, under
//!    [`SyncPolicy::Immediate`], written at once.
//! 3. A failed operation leaves the dataset exactly as it was.
//! 4. Nothing here touches global state; the handle table is passed in.
//!
//! # Modules
//!
//! - [`error`]: [`DatasetError`] and the classic status codes
//! - [`config`]: [`DatasetConfig`] and [`SyncPolicy`]
//! - [`dataset`]: Per-dataset state
//! - [`sync`]: The [`HeaderSync`] collaborator
//! - [`table`]: [`DatasetTable`] and [`InMemoryDatasetTable`]
//! - [`lifecycle`]: create/open/redef/enddef/abort/close
//! - [`ops`]: `def_dim`, `inq_dimid`, `inq_dim`, `rename_dim` and friends

pub mod config;
pub mod dataset;
pub mod error;
pub mod lifecycle;
pub mod ops;
pub mod sync;
pub mod table;

pub use config::{DatasetConfig, SyncPolicy};
pub use dataset::Dataset;
pub use error::{DatasetError, DatasetResult};
pub use lifecycle::{abort, close, create, enddef, open, redef, set_numrecs};
pub use ops::{
    def_dim, inq_dim, inq_dimid, inq_dimlen, inq_dimname, inq_ndims, inq_unlimdim, rename_dim,
    DimInfo,
};
pub use sync::{HeaderSync, HeaderView, NoopSync};
pub use table::{DatasetTable, InMemoryDatasetTable};
