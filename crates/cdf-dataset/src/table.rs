//! The dataset-handle table.
//!
//! Callers refer to datasets by [`DatasetId`]. A [`DatasetTable`] turns
//! that id back into the dataset's state. Operations take the table as a
//! parameter, so several independent tables can coexist and nothing here
//! depends on process-wide state.

use std::collections::HashMap;

use cdf_types::DatasetId;

use crate::dataset::Dataset;
use crate::error::{DatasetError, DatasetResult};

/// Resolves dataset ids to dataset state.
///
/// Implementations need no internal locking; callers sharing a table
/// across threads must serialize access themselves.
pub trait DatasetTable {
    /// Register a dataset and return its new id.
    fn insert(&mut self, dataset: Dataset) -> DatasetId;

    /// Resolve `id`, failing with [`DatasetError::BadId`] if unknown.
    fn get(&self, id: DatasetId) -> DatasetResult<&Dataset>;

    /// Resolve `id` for mutation.
    fn get_mut(&mut self, id: DatasetId) -> DatasetResult<&mut Dataset>;

    /// Unregister `id` and hand back its state.
    fn remove(&mut self, id: DatasetId) -> DatasetResult<Dataset>;

    /// Returns `true` if `id` names an open dataset.
    fn contains(&self, id: DatasetId) -> bool {
        self.get(id).is_ok()
    }
}

/// Table slots are shifted into the high bits of the id, leaving the low
/// bits for group numbers the way classic handles do.
const ID_SHIFT: u32 = 16;

/// `HashMap`-backed [`DatasetTable`].
#[derive(Debug)]
pub struct InMemoryDatasetTable {
    datasets: HashMap<DatasetId, Dataset>,
    next_slot: i32,
}

impl InMemoryDatasetTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            datasets: HashMap::new(),
            next_slot: 1,
        }
    }

    /// Number of open datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Returns `true` if no datasets are open.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Default for InMemoryDatasetTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetTable for InMemoryDatasetTable {
    fn insert(&mut self, dataset: Dataset) -> DatasetId {
        let id = DatasetId::new(self.next_slot << ID_SHIFT);
        self.next_slot += 1;
        self.datasets.insert(id, dataset);
        id
    }

    fn get(&self, id: DatasetId) -> DatasetResult<&Dataset> {
        self.datasets.get(&id).ok_or(DatasetError::BadId(id))
    }

    fn get_mut(&mut self, id: DatasetId) -> DatasetResult<&mut Dataset> {
        self.datasets.get_mut(&id).ok_or(DatasetError::BadId(id))
    }

    fn remove(&mut self, id: DatasetId) -> DatasetResult<Dataset> {
        self.datasets.remove(&id).ok_or(DatasetError::BadId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::sync::NoopSync;

    fn make_dataset() -> Dataset {
        Dataset::created(&DatasetConfig::default(), Box::new(NoopSync))
    }

    #[test]
    fn insert_and_resolve() {
        let mut table = InMemoryDatasetTable::new();
        let a = table.insert(make_dataset());
        let b = table.insert(make_dataset());
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert!(table.get(a).unwrap().is_define_mode());
        assert!(table.contains(b));
    }

    #[test]
    fn ids_use_high_bits() {
        let mut table = InMemoryDatasetTable::new();
        let id = table.insert(make_dataset());
        assert_eq!(id.raw(), 1 << 16);
    }

    #[test]
    fn unknown_id_is_bad_id() {
        let mut table = InMemoryDatasetTable::new();
        let missing = DatasetId::new(42);
        assert!(matches!(table.get(missing), Err(DatasetError::BadId(id)) if id == missing));
        assert!(matches!(table.get_mut(missing), Err(DatasetError::BadId(_))));
        assert!(!table.contains(missing));
    }

    #[test]
    fn remove_closes_handle() {
        let mut table = InMemoryDatasetTable::new();
        let id = table.insert(make_dataset());
        table.remove(id).unwrap();
        assert!(table.is_empty());
        assert!(matches!(table.remove(id), Err(DatasetError::BadId(_))));
    }
}
