use std::fmt;

use serde::{Deserialize, Serialize};

/// The length of a dimension.
///
/// A length of zero is the on-disk sentinel for the unlimited (record)
/// dimension, whose effective length is the dataset's record count.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimSize(u64);

impl DimSize {
    /// The unlimited sentinel.
    pub const UNLIMITED: Self = Self(0);

    pub const fn new(size: u64) -> Self {
        Self(size)
    }

    /// The raw stored value (`0` for unlimited).
    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_unlimited(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for DimSize {
    fn from(size: u64) -> Self {
        Self(size)
    }
}

impl From<DimSize> for u64 {
    fn from(size: DimSize) -> Self {
        size.0
    }
}

impl fmt::Debug for DimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            f.write_str("DimSize(UNLIMITED)")
        } else {
            write!(f, "DimSize({})", self.0)
        }
    }
}

impl fmt::Display for DimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            f.write_str("UNLIMITED")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
