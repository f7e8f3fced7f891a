//! Fixed limits of the classic format.

/// Maximum number of dimensions in one dataset.
pub const MAX_DIMS: usize = 1024;

/// Maximum length of a name, in bytes.
pub const MAX_NAME: usize = 256;

/// Number of slots added to a metadata array each time it fills up.
pub const ARRAY_GROWBY: usize = 4;

/// Largest value of a signed 32-bit external integer.
pub const X_INT_MAX: u64 = i32::MAX as u64;

/// Largest value of an unsigned 32-bit external integer.
pub const X_UINT_MAX: u64 = u32::MAX as u64;

/// Largest value of an unsigned 64-bit external integer.
pub const X_UINT64_MAX: u64 = u64::MAX;
