//! Name handling for classic-format datasets.
//!
//! Every named object in a dataset (dimensions here, but the rules are the
//! same for variables and attributes) is stored under its *canonical* name:
//! the Unicode NFC composition of the bytes the caller supplied. Lookups and
//! uniqueness checks always compare canonical names.
//!
//! # Modules
//!
//! - [`error`]: Error types for name operations
//! - [`normalize`]: Raw bytes to canonical text
//! - [`buffer`]: [`NameBuf`], the owned, capacity-bounded name
//! - [`check`]: General naming rules ([`check_name`])

pub mod buffer;
pub mod check;
pub mod error;
pub mod normalize;

pub use buffer::NameBuf;
pub use check::check_name;
pub use error::{NameError, Result};
pub use normalize::normalize;
