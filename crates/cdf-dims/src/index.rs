//! The name-to-position index kept alongside the dimension array.

use std::collections::{HashMap, TryReserveError};

use cdf_types::DimId;

/// Maps canonical names to dimension positions.
///
/// The registry reserves before it inserts: once
/// [`try_reserve`](NameIndex::try_reserve) has succeeded for `n` more
/// entries, the next `n` calls to [`insert`](NameIndex::insert) must not
/// allocate for the table itself. Dropping the index destroys it.
pub trait NameIndex {
    /// Create an empty index sized for about `hint` names.
    fn create(hint: usize) -> Result<Self, TryReserveError>
    where
        Self: Sized;

    /// Make room for `additional` more entries.
    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError>;

    /// Map `name` to `id`, replacing any previous mapping for `name`.
    fn insert(&mut self, name: String, id: DimId);

    /// Position currently mapped to `name`.
    fn lookup(&self, name: &str) -> Option<DimId>;

    /// Remove the mapping for `name`, returning the position it held.
    fn remove(&mut self, name: &str) -> Option<DimId>;

    /// Number of mappings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`NameIndex`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct HashNameIndex {
    map: HashMap<String, DimId>,
}

impl NameIndex for HashNameIndex {
    fn create(hint: usize) -> Result<Self, TryReserveError> {
        let mut map = HashMap::new();
        map.try_reserve(hint)?;
        Ok(Self { map })
    }

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.map.try_reserve(additional)
    }

    fn insert(&mut self, name: String, id: DimId) {
        self.map.insert(name, id);
    }

    fn lookup(&self, name: &str) -> Option<DimId> {
        self.map.get(name).copied()
    }

    fn remove(&mut self, name: &str) -> Option<DimId> {
        self.map.remove(name)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_lookup_remove() {
        let mut index = HashNameIndex::create(4).unwrap();
        assert!(index.is_empty());

        index.insert("time".into(), DimId::new(0));
        index.insert("lat".into(), DimId::new(1));
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("lat"), Some(DimId::new(1)));
        assert_eq!(index.lookup("lon"), None);

        assert_eq!(index.remove("time"), Some(DimId::new(0)));
        assert_eq!(index.remove("time"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_replaces_existing_mapping() {
        let mut index = HashNameIndex::default();
        index.insert("x".into(), DimId::new(0));
        index.insert("x".into(), DimId::new(3));
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("x"), Some(DimId::new(3)));
    }
}
