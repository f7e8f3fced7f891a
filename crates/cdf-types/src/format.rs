use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::limits::{X_INT_MAX, X_UINT64_MAX, X_UINT_MAX};
use crate::size::DimSize;

/// Headroom kept below each format's integer ceiling so that a length
/// rounded up to a 4-byte boundary still fits.
const ROUNDING_MARGIN: u64 = 3;

/// The three size-limit variants of the classic container format.
///
/// The variant is recorded in the fourth byte of the file magic
/// (`CDF\x01`, `CDF\x02`, `CDF\x05`) and decides how wide the on-disk
/// length and offset fields are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatVariant {
    /// CDF-1: signed 32-bit lengths and offsets.
    #[default]
    Classic,
    /// CDF-2: 64-bit offsets, 32-bit unsigned lengths.
    Offset64,
    /// CDF-5: 64-bit offsets and lengths.
    Data64,
}

impl FormatVariant {
    /// Largest dimension length this variant can record.
    pub const fn max_dim_size(self) -> u64 {
        match self {
            Self::Classic => X_INT_MAX - ROUNDING_MARGIN,
            Self::Offset64 => X_UINT_MAX - ROUNDING_MARGIN,
            Self::Data64 => X_UINT64_MAX - ROUNDING_MARGIN,
        }
    }

    /// Returns `true` if `size` is within this variant's bound.
    ///
    /// The unlimited sentinel is always admitted.
    pub fn admits(self, size: DimSize) -> bool {
        size.get() <= self.max_dim_size()
    }

    /// The version byte stored in the file magic.
    pub const fn version(self) -> u8 {
        match self {
            Self::Classic => 1,
            Self::Offset64 => 2,
            Self::Data64 => 5,
        }
    }

    /// Recover the variant from a magic version byte.
    pub fn from_version(version: u8) -> Result<Self, TypeError> {
        match version {
            1 => Ok(Self::Classic),
            2 => Ok(Self::Offset64),
            5 => Ok(Self::Data64),
            other => Err(TypeError::UnknownVersion(other)),
        }
    }
}

impl fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Classic => "classic",
            Self::Offset64 => "offset64",
            Self::Data64 => "data64",
        };
        f.write_str(s)
    }
}

impl FromStr for FormatVariant {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "cdf1" | "cdf-1" => Ok(Self::Classic),
            "offset64" | "64bit_offset" | "cdf2" | "cdf-2" => Ok(Self::Offset64),
            "data64" | "64bit_data" | "cdf5" | "cdf-5" => Ok(Self::Data64),
            _ => Err(TypeError::UnknownFormat(s.to_string())),
        }
    }
}
