//! Dimension operations on an open dataset.
//!
//! These are the dataset-facing entry points. Each one resolves the
//! dataset through the table, applies the mode and permission rules, and
//! delegates to the dataset's [`DimArray`](cdf_dims::DimArray).

use serde::Serialize;
use tracing::debug;

use cdf_dims::RenameMode;
use cdf_names::check_name;
use cdf_types::{DatasetId, DimId, DimSize, MAX_DIMS};

use crate::error::{DatasetError, DatasetResult};
use crate::table::DatasetTable;

/// Name and effective length of a dimension, as reported by [`inq_dim`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DimInfo {
    pub name: String,
    /// Declared length, or the current record count for the unlimited
    /// dimension.
    pub len: u64,
}

/// Define a new dimension and return its id.
///
/// Checks, in order: define mode, naming rules, the format variant's size
/// bound, the single-unlimited rule, the dimension count limit, and name
/// uniqueness. Pass [`DimSize::UNLIMITED`] (or `0`) for the record
/// dimension.
pub fn def_dim(
    table: &mut impl DatasetTable,
    ncid: DatasetId,
    name: impl AsRef<[u8]>,
    size: impl Into<DimSize>,
) -> DatasetResult<DimId> {
    let name = name.as_ref();
    let size = size.into();
    let ds = table.get_mut(ncid)?;

    if !ds.is_define_mode() {
        return Err(DatasetError::NotInDefine);
    }

    check_name(name)?;

    let format = ds.format();
    if !format.admits(size) {
        return Err(DatasetError::DimSize {
            size: size.get(),
            format,
            max: format.max_dim_size(),
        });
    }

    if size.is_unlimited() && ds.dims().find_unlimited().is_some() {
        return Err(DatasetError::Unlimit);
    }

    if ds.dims().len() >= MAX_DIMS {
        return Err(DatasetError::MaxDims(MAX_DIMS));
    }

    if let Some(existing) = ds.dims().find_by_name(name)? {
        let taken = ds
            .dims()
            .get(existing)
            .map(|dim| dim.name().to_string())
            .unwrap_or_default();
        return Err(DatasetError::NameInUse(taken));
    }

    let dimid = ds.dims_mut().append(name, size)?;
    debug!(%ncid, %dimid, %size, "defined dimension");
    Ok(dimid)
}

/// Look up a dimension id by name.
pub fn inq_dimid(
    table: &impl DatasetTable,
    ncid: DatasetId,
    name: impl AsRef<[u8]>,
) -> DatasetResult<DimId> {
    let name = name.as_ref();
    let ds = table.get(ncid)?;
    ds.dims()
        .find_by_name(name)?
        .ok_or_else(|| DatasetError::BadDim(String::from_utf8_lossy(name).into_owned()))
}

/// Name and length of the dimension `dimid`.
///
/// The unlimited dimension reports the dataset's current record count.
pub fn inq_dim(table: &impl DatasetTable, ncid: DatasetId, dimid: DimId) -> DatasetResult<DimInfo> {
    let ds = table.get(ncid)?;
    let dim = ds
        .dims()
        .get(dimid)
        .ok_or_else(|| DatasetError::BadDim(dimid.to_string()))?;

    let len = if dim.is_unlimited() {
        ds.numrecs()
    } else {
        dim.size().get()
    };
    Ok(DimInfo {
        name: dim.name().to_string(),
        len,
    })
}

/// Name of the dimension `dimid`.
pub fn inq_dimname(
    table: &impl DatasetTable,
    ncid: DatasetId,
    dimid: DimId,
) -> DatasetResult<String> {
    inq_dim(table, ncid, dimid).map(|info| info.name)
}

/// Effective length of the dimension `dimid`.
pub fn inq_dimlen(table: &impl DatasetTable, ncid: DatasetId, dimid: DimId) -> DatasetResult<u64> {
    inq_dim(table, ncid, dimid).map(|info| info.len)
}

/// Number of dimensions defined in the dataset.
pub fn inq_ndims(table: &impl DatasetTable, ncid: DatasetId) -> DatasetResult<usize> {
    Ok(table.get(ncid)?.dims().len())
}

/// Id of the unlimited dimension, if the dataset has one.
pub fn inq_unlimdim(table: &impl DatasetTable, ncid: DatasetId) -> DatasetResult<Option<DimId>> {
    Ok(table.get(ncid)?.dims().find_unlimited().map(|(id, _)| id))
}

/// Rename the dimension `dimid`.
///
/// Allowed in both modes on a writable dataset. In define mode the name may
/// take any length. In data mode the header is already laid out, so the new
/// name must fit in the bytes of the old one; on success the header is
/// marked dirty and written at once under
/// [`SyncPolicy::Immediate`](crate::SyncPolicy::Immediate). A write failure
/// is returned, but the rename itself stays applied.
pub fn rename_dim(
    table: &mut impl DatasetTable,
    ncid: DatasetId,
    dimid: DimId,
    new_name: impl AsRef<[u8]>,
) -> DatasetResult<()> {
    let new_name = new_name.as_ref();
    let ds = table.get_mut(ncid)?;

    if ds.is_read_only() {
        return Err(DatasetError::Perm);
    }

    check_name(new_name)?;

    if let Some(existing) = ds.dims().find_by_name(new_name)? {
        // Already named that: nothing changes and nothing is written.
        if existing == dimid {
            return Ok(());
        }
        return Err(DatasetError::NameInUse(
            String::from_utf8_lossy(new_name).into_owned(),
        ));
    }

    if ds.dims().get(dimid).is_none() {
        return Err(DatasetError::BadDim(dimid.to_string()));
    }

    if ds.is_define_mode() {
        ds.dims_mut().rename(dimid, new_name, RenameMode::Define)?;
        return Ok(());
    }

    ds.dims_mut().rename(dimid, new_name, RenameMode::InPlace)?;
    ds.mark_header_dirty();
    ds.sync_if_required()
}
