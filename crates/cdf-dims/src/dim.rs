//! The dimension record stored in each registry slot.

use cdf_names::{NameBuf, NameError};
use cdf_types::DimSize;
use serde::Serialize;

/// A named axis of stored array data.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Dimension {
    /// Canonical name.
    name: NameBuf,
    /// Declared length, or [`DimSize::UNLIMITED`] for the record dimension.
    size: DimSize,
}

impl Dimension {
    /// Create a dimension from an already-built name.
    pub fn new(name: NameBuf, size: DimSize) -> Self {
        Self { name, size }
    }

    pub fn name(&self) -> &NameBuf {
        &self.name
    }

    pub fn size(&self) -> DimSize {
        self.size
    }

    /// Returns `true` if this is the record dimension.
    pub fn is_unlimited(&self) -> bool {
        self.size.is_unlimited()
    }

    /// Deep copy of name and size.
    pub fn try_clone(&self) -> Result<Self, NameError> {
        Ok(Self {
            name: self.name.try_clone()?,
            size: self.size,
        })
    }

    pub(crate) fn name_mut(&mut self) -> &mut NameBuf {
        &mut self.name
    }

    pub(crate) fn set_name(&mut self, name: NameBuf) {
        self.name = name;
    }
}
