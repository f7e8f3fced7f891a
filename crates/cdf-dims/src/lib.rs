//! Dimension registry for classic-format datasets.
//!
//! Dimensions live in an append-only array; a dimension's position in that
//! array is its [`DimId`](cdf_types::DimId), which variables reference on
//! disk and which therefore never changes. A side index maps each canonical
//! name to its position so name lookups do not scan the array.
//!
//! # Key Types
//!
//! - [`DimArray`] -- The registry: array and name index behind one API
//! - [`Dimension`] -- A named, sized dimension
//! - [`NameIndex`] -- The name-to-position index interface
//! - [`HashNameIndex`] -- `HashMap`-backed [`NameIndex`]
//! - [`RenameMode`] -- Define-mode substitution vs. in-place rewrite

pub mod array;
pub mod dim;
pub mod error;
pub mod index;

pub use array::{DimArray, RenameMode};
pub use dim::Dimension;
pub use error::{DimError, DimResult};
pub use index::{HashNameIndex, NameIndex};
