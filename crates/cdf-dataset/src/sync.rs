//! The header write-back collaborator.
//!
//! Encoding the header and writing it to storage is not this crate's job.
//! A dataset hands a [`HeaderView`] to its [`HeaderSync`] whenever the
//! header must reach storage and reports any I/O failure to the caller.

use std::io;

use cdf_dims::DimArray;
use cdf_types::FormatVariant;

/// Read-only view of the header fields owned by this layer.
#[derive(Clone, Copy, Debug)]
pub struct HeaderView<'a> {
    pub format: FormatVariant,
    pub numrecs: u64,
    pub dims: &'a DimArray,
}

/// Writes a dataset header to storage.
pub trait HeaderSync {
    fn sync(&mut self, header: HeaderView<'_>) -> io::Result<()>;
}

/// A [`HeaderSync`] that writes nothing, for purely in-memory datasets.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSync;

impl HeaderSync for NoopSync {
    fn sync(&mut self, _header: HeaderView<'_>) -> io::Result<()> {
        Ok(())
    }
}

impl<F> HeaderSync for F
where
    F: FnMut(HeaderView<'_>) -> io::Result<()>,
{
    fn sync(&mut self, header: HeaderView<'_>) -> io::Result<()> {
        self(header)
    }
}
