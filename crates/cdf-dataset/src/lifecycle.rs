//! Dataset lifecycle: create, open, define-mode transitions, and close.
//!
//! `redef` snapshots the dimension registry with
//! [`DimArray::duplicate`](cdf_dims::DimArray::duplicate) so that `abort`
//! can put it back.

use tracing::{debug, info};

use cdf_dims::DimArray;
use cdf_types::DatasetId;

use crate::config::DatasetConfig;
use crate::dataset::Dataset;
use crate::error::{DatasetError, DatasetResult};
use crate::sync::HeaderSync;
use crate::table::DatasetTable;

/// Create a new, empty dataset in define mode.
pub fn create(
    table: &mut impl DatasetTable,
    config: &DatasetConfig,
    syncer: Box<dyn HeaderSync>,
) -> DatasetId {
    let ncid = table.insert(Dataset::created(config, syncer));
    info!(%ncid, format = %config.format, "dataset created");
    ncid
}

/// Register an existing dataset, already decoded into `dims`, in data mode.
pub fn open(
    table: &mut impl DatasetTable,
    config: &DatasetConfig,
    dims: DimArray,
    syncer: Box<dyn HeaderSync>,
) -> DatasetId {
    let ndims = dims.len();
    let ncid = table.insert(Dataset::opened(config, dims, syncer));
    info!(%ncid, format = %config.format, ndims, read_only = config.read_only, "dataset opened");
    ncid
}

/// Re-enter define mode.
pub fn redef(table: &mut impl DatasetTable, ncid: DatasetId) -> DatasetResult<()> {
    let ds = table.get_mut(ncid)?;
    if ds.is_read_only() {
        return Err(DatasetError::Perm);
    }
    if ds.is_define_mode() {
        return Err(DatasetError::InDefine);
    }

    let saved = ds.dims().duplicate()?;
    ds.begin_define(saved);
    debug!(%ncid, "entered define mode");
    Ok(())
}

/// Write the header and leave define mode.
///
/// If the header cannot be written the dataset stays in define mode.
pub fn enddef(table: &mut impl DatasetTable, ncid: DatasetId) -> DatasetResult<()> {
    let ds = table.get_mut(ncid)?;
    if !ds.is_define_mode() {
        return Err(DatasetError::NotInDefine);
    }

    ds.mark_header_dirty();
    ds.sync()?;
    ds.end_define();
    debug!(%ncid, ndims = ds.dims().len(), "left define mode");
    Ok(())
}

/// Set the number of records along the unlimited dimension.
pub fn set_numrecs(table: &mut impl DatasetTable, ncid: DatasetId, numrecs: u64) -> DatasetResult<()> {
    let ds = table.get_mut(ncid)?;
    if ds.is_read_only() {
        return Err(DatasetError::Perm);
    }
    ds.set_numrecs(numrecs);
    if ds.is_define_mode() {
        return Ok(());
    }
    ds.mark_header_dirty();
    ds.sync_if_required()
}

/// Close the dataset, leaving define mode first if needed, and return its
/// final state.
///
/// If the header cannot be written the dataset stays open in its current
/// mode, so a define-mode dataset can still be aborted.
pub fn close(table: &mut impl DatasetTable, ncid: DatasetId) -> DatasetResult<Dataset> {
    let ds = table.get_mut(ncid)?;
    if ds.is_define_mode() {
        ds.mark_header_dirty();
    }
    ds.sync()?;
    ds.end_define();
    let ds = table.remove(ncid)?;
    info!(%ncid, "dataset closed");
    Ok(ds)
}

/// Close the dataset without writing anything, discarding define-mode
/// changes since the last `redef`, and return its final state.
pub fn abort(table: &mut impl DatasetTable, ncid: DatasetId) -> DatasetResult<Dataset> {
    let mut ds = table.remove(ncid)?;
    if ds.is_define_mode() {
        ds.discard_define();
        debug!(%ncid, "discarded define-mode changes");
    }
    info!(%ncid, "dataset aborted");
    Ok(ds)
}
