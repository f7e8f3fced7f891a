//! Per-dataset state.

use std::fmt;

use cdf_dims::DimArray;
use cdf_types::FormatVariant;
use tracing::{debug, warn};

use crate::config::{DatasetConfig, SyncPolicy};
use crate::error::DatasetResult;
use crate::sync::{HeaderSync, HeaderView};

/// The in-memory state of one open dataset.
///
/// Only the parts the dimension layer needs are modelled: the format
/// variant, the mode flags, the live record count, the dimension registry,
/// and the header write-back path.
pub struct Dataset {
    format: FormatVariant,
    sync_policy: SyncPolicy,
    read_only: bool,
    define_mode: bool,
    header_dirty: bool,
    numrecs: u64,
    dims: DimArray,
    /// Registry as it was at `redef`, restored by `abort`.
    saved_dims: Option<DimArray>,
    syncer: Box<dyn HeaderSync>,
}

impl Dataset {
    /// A newly created dataset: empty, writable, in define mode.
    pub fn created(config: &DatasetConfig, syncer: Box<dyn HeaderSync>) -> Self {
        Self {
            format: config.format,
            sync_policy: config.sync_policy,
            read_only: false,
            define_mode: true,
            header_dirty: false,
            numrecs: 0,
            dims: DimArray::new(),
            saved_dims: None,
            syncer,
        }
    }

    /// An existing dataset whose header has been decoded into `dims`.
    /// Starts in data mode.
    pub fn opened(config: &DatasetConfig, dims: DimArray, syncer: Box<dyn HeaderSync>) -> Self {
        Self {
            format: config.format,
            sync_policy: config.sync_policy,
            read_only: config.read_only,
            define_mode: false,
            header_dirty: false,
            numrecs: config.initial_numrecs,
            dims,
            saved_dims: None,
            syncer,
        }
    }

    pub fn format(&self) -> FormatVariant {
        self.format
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        self.sync_policy
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_define_mode(&self) -> bool {
        self.define_mode
    }

    pub fn is_header_dirty(&self) -> bool {
        self.header_dirty
    }

    /// Current number of records along the unlimited dimension.
    pub fn numrecs(&self) -> u64 {
        self.numrecs
    }

    pub fn dims(&self) -> &DimArray {
        &self.dims
    }

    pub(crate) fn dims_mut(&mut self) -> &mut DimArray {
        &mut self.dims
    }

    pub(crate) fn set_numrecs(&mut self, numrecs: u64) {
        self.numrecs = numrecs;
    }

    pub(crate) fn mark_header_dirty(&mut self) {
        self.header_dirty = true;
    }

    /// Enter define mode, keeping `saved` for a later abort.
    pub(crate) fn begin_define(&mut self, saved: DimArray) {
        self.saved_dims = Some(saved);
        self.define_mode = true;
    }

    /// Leave define mode and forget the saved registry.
    pub(crate) fn end_define(&mut self) {
        self.saved_dims = None;
        self.define_mode = false;
    }

    /// Leave define mode, putting back the registry saved at `redef`.
    ///
    /// A dataset created in this session has nothing saved; its
    /// dimensions are discarded.
    pub(crate) fn discard_define(&mut self) {
        match self.saved_dims.take() {
            Some(saved) => self.dims = saved,
            None => self.dims.teardown(),
        }
        self.define_mode = false;
        self.header_dirty = false;
    }

    /// Write the header if it is dirty.
    pub fn sync(&mut self) -> DatasetResult<()> {
        if !self.header_dirty {
            return Ok(());
        }
        let view = HeaderView {
            format: self.format,
            numrecs: self.numrecs,
            dims: &self.dims,
        };
        if let Err(e) = self.syncer.sync(view) {
            warn!(error = %e, "header sync failed");
            return Err(e.into());
        }
        self.header_dirty = false;
        debug!(ndims = self.dims.len(), numrecs = self.numrecs, "header synced");
        Ok(())
    }

    /// Write the header now if the sync policy asks for it.
    pub(crate) fn sync_if_required(&mut self) -> DatasetResult<()> {
        match self.sync_policy {
            SyncPolicy::Immediate => self.sync(),
            SyncPolicy::Deferred => Ok(()),
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("format", &self.format)
            .field("sync_policy", &self.sync_policy)
            .field("read_only", &self.read_only)
            .field("define_mode", &self.define_mode)
            .field("header_dirty", &self.header_dirty)
            .field("numrecs", &self.numrecs)
            .field("ndims", &self.dims.len())
            .field("saved", &self.saved_dims.is_some())
            .finish()
    }
}
