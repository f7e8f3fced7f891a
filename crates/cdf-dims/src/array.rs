//! The dimension registry.
//!
//! [`DimArray`] owns an append-only `Vec<Dimension>` and a [`NameIndex`]
//! from canonical name to position. Both structures are private and every
//! mutating method updates them together, so the following hold after any
//! call returns, whether it succeeded or not:
//!
//! - `len() <= capacity()`, and capacity only grows (by [`ARRAY_GROWBY`])
//!   until [`DimArray::teardown`].
//! - A dimension's [`DimId`] is the position it was appended at.
//! - The index holds exactly one mapping per dimension, from its current
//!   canonical name to its position. Names are unique.
//! - At most one dimension is unlimited.

use std::fmt;

use cdf_names::{normalize, NameBuf};
use cdf_types::{DimId, DimSize, ARRAY_GROWBY};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::dim::Dimension;
use crate::error::{DimError, DimResult};
use crate::index::{HashNameIndex, NameIndex};

/// How [`DimArray::rename`] stores the new name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameMode {
    /// Definition phase: the header has not been laid out, so the name is
    /// replaced with a freshly allocated buffer of any length.
    Define,
    /// Data phase: the header is committed and the name is rewritten inside
    /// its existing buffer. The new name may not be longer than the
    /// original.
    InPlace,
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Define => f.write_str("define"),
            Self::InPlace => f.write_str("in-place"),
        }
    }
}

/// Ordered dimensions plus a name index.
pub struct DimArray<I = HashNameIndex> {
    /// Dimensions in position order.
    dims: Vec<Dimension>,
    /// Allocated slots, grown in steps of `ARRAY_GROWBY`.
    nalloc: usize,
    /// Created on first append, dropped by `clear`.
    index: Option<I>,
}

impl DimArray<HashNameIndex> {
    /// Create an empty registry using the default hash index.
    pub fn new() -> Self {
        Self::empty()
    }
}

impl<I> Default for DimArray<I> {
    fn default() -> Self {
        Self {
            dims: Vec::new(),
            nalloc: 0,
            index: None,
        }
    }
}

impl<I: NameIndex> DimArray<I> {
    /// Create an empty registry with any index type.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Returns `true` if no dimensions are defined.
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.nalloc
    }

    /// Dimensions with their ids, in position order.
    pub fn iter(&self) -> impl Iterator<Item = (DimId, &Dimension)> + '_ {
        self.dims
            .iter()
            .enumerate()
            .map(|(pos, dim)| (DimId::new(pos as i32), dim))
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// The dimension at `id`, or `None` if `id` is negative or past the end.
    pub fn get(&self, id: DimId) -> Option<&Dimension> {
        id.index().and_then(|pos| self.dims.get(pos))
    }

    /// The unlimited dimension, if one is defined.
    ///
    /// A linear scan; at most one dimension can match.
    pub fn find_unlimited(&self) -> Option<(DimId, &Dimension)> {
        self.iter().find(|(_, dim)| dim.is_unlimited())
    }

    /// Position of the dimension whose canonical name matches `name`.
    ///
    /// `name` is normalized before the lookup; invalid UTF-8 is an
    /// [`DimError::Encoding`] error rather than a miss.
    pub fn find_by_name(&self, name: impl AsRef<[u8]>) -> DimResult<Option<DimId>> {
        let canonical = normalize(name)?;
        Ok(self.lookup_canonical(&canonical))
    }

    fn lookup_canonical(&self, canonical: &str) -> Option<DimId> {
        self.index.as_ref().and_then(|index| index.lookup(canonical))
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Append a dimension and return its position.
    ///
    /// Fails with [`DimError::NameInUse`] if the canonical name is taken
    /// and with [`DimError::Unlimit`] for a second unlimited dimension.
    /// Everything that can fail happens before the new dimension becomes
    /// visible, so on error the registry holds exactly what it held before
    /// (capacity may have grown).
    pub fn append(&mut self, name: impl AsRef<[u8]>, size: DimSize) -> DimResult<DimId> {
        let name = NameBuf::new(name)?;
        if self.lookup_canonical(name.as_str()).is_some() {
            return Err(DimError::NameInUse(name.to_string()));
        }
        if size.is_unlimited() && self.find_unlimited().is_some() {
            return Err(DimError::Unlimit);
        }
        let id = DimId::try_from(self.dims.len()).map_err(|_| DimError::IdOverflow)?;
        let key = owned_key(name.as_str())?;

        self.grow()?;
        let index = self.ensure_index()?;
        index.try_reserve(1)?;
        index.insert(key, id);

        debug!(dimid = %id, name = %name, size = %size, "appended dimension");
        self.dims.push(Dimension::new(name, size));
        Ok(id)
    }

    /// Rename the dimension at `id`.
    ///
    /// Renaming a dimension to its own current canonical name succeeds
    /// without changes. The old index mapping is removed before the new one
    /// is inserted. All allocation and capacity checks run before anything
    /// is modified.
    pub fn rename(
        &mut self,
        id: DimId,
        new_name: impl AsRef<[u8]>,
        mode: RenameMode,
    ) -> DimResult<()> {
        let canonical = normalize(new_name)?;

        if let Some(existing) = self.lookup_canonical(&canonical) {
            // The classic library answers NameInUse for a self-rename.
            if existing == id {
                return Ok(());
            }
            return Err(DimError::NameInUse(canonical));
        }

        let pos = id
            .index()
            .filter(|&pos| pos < self.dims.len())
            .ok_or(DimError::NotFound(id))?;

        let replacement = match mode {
            RenameMode::Define => Some(NameBuf::from_canonical(&canonical)?),
            RenameMode::InPlace => {
                let capacity = self.dims[pos].name().capacity();
                if canonical.len() > capacity {
                    return Err(DimError::CapacityExceeded {
                        needed: canonical.len(),
                        capacity,
                    });
                }
                None
            }
        };
        let key = owned_key(&canonical)?;

        let Some(index) = self.index.as_mut() else {
            return Err(DimError::NotFound(id));
        };
        let dim = &mut self.dims[pos];

        debug!(dimid = %id, from = %dim.name(), to = %canonical, %mode, "renaming dimension");
        index.remove(dim.name().as_str());
        match replacement {
            Some(name) => dim.set_name(name),
            None => dim.name_mut().rewrite(&canonical)?,
        }
        index.insert(key, id);
        Ok(())
    }

    /// Deep copy into a new, independent registry.
    ///
    /// The copy has exactly `len()` slots and a freshly built index. If any
    /// allocation fails the partial copy is dropped and nothing is returned.
    pub fn duplicate(&self) -> DimResult<Self> {
        let mut dims = Vec::new();
        dims.try_reserve_exact(self.dims.len())?;
        for dim in &self.dims {
            dims.push(dim.try_clone()?);
        }

        let index = if dims.is_empty() {
            None
        } else {
            let mut index = I::create(dims.len())?;
            for (pos, dim) in dims.iter().enumerate() {
                index.try_reserve(1)?;
                index.insert(owned_key(dim.name().as_str())?, DimId::new(pos as i32));
            }
            Some(index)
        };

        debug!(count = dims.len(), "duplicated dimension array");
        Ok(Self {
            nalloc: dims.len(),
            dims,
            index,
        })
    }

    /// Drop every dimension and the index; keep the allocated slots.
    pub fn clear(&mut self) {
        self.dims.clear();
        self.index = None;
    }

    /// Drop everything and release the allocated slots.
    pub fn teardown(&mut self) {
        self.clear();
        self.dims = Vec::new();
        self.nalloc = 0;
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    /// Make sure one more dimension fits without reallocating.
    fn grow(&mut self) -> DimResult<()> {
        if self.dims.len() < self.nalloc {
            return Ok(());
        }
        let target = self.nalloc + ARRAY_GROWBY;
        self.dims.try_reserve_exact(target - self.dims.len())?;
        self.nalloc = target;
        Ok(())
    }

    fn ensure_index(&mut self) -> DimResult<&mut I> {
        let index = match self.index.take() {
            Some(index) => index,
            None => I::create(ARRAY_GROWBY)?,
        };
        Ok(self.index.insert(index))
    }
}

/// Copy a name into a string whose allocation failure is reported.
fn owned_key(name: &str) -> DimResult<String> {
    let mut key = String::new();
    key.try_reserve_exact(name.len())?;
    key.push_str(name);
    Ok(key)
}

impl<I> fmt::Debug for DimArray<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimArray")
            .field("dims", &self.dims)
            .field("nalloc", &self.nalloc)
            .field("indexed", &self.index.is_some())
            .finish()
    }
}

impl<I> Serialize for DimArray<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::{HashMap, TryReserveError};

    fn make_array(names: &[(&str, u64)]) -> DimArray {
        let mut dims = DimArray::new();
        for (name, size) in names {
            dims.append(name, DimSize::new(*size)).unwrap();
        }
        dims
    }

    fn snapshot<I: NameIndex>(dims: &DimArray<I>) -> Vec<(i32, String, u64)> {
        dims.iter()
            .map(|(id, d)| (id.raw(), d.name().to_string(), d.size().get()))
            .collect()
    }

    thread_local! {
        static RESERVE_BUDGET: Cell<usize> = const { Cell::new(usize::MAX) };
    }

    fn set_reserve_budget(n: usize) {
        RESERVE_BUDGET.with(|budget| budget.set(n));
    }

    /// Index whose reservations fail once the thread's budget runs out.
    #[derive(Default)]
    struct FlakyIndex {
        map: HashMap<String, DimId>,
    }

    impl NameIndex for FlakyIndex {
        fn create(_hint: usize) -> Result<Self, TryReserveError> {
            Ok(Self::default())
        }

        fn try_reserve(&mut self, _additional: usize) -> Result<(), TryReserveError> {
            RESERVE_BUDGET.with(|budget| match budget.get() {
                0 => Err(Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err()),
                left => {
                    budget.set(left - 1);
                    Ok(())
                }
            })
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

    #[test]
    fn new_array_is_empty() {
        let dims = DimArray::new();
        assert!(dims.is_empty());
        assert_eq!(dims.capacity(), 0);
        assert!(dims.find_unlimited().is_none());
        assert_eq!(dims.find_by_name("time").unwrap(), None);
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut dims = DimArray::new();
        let a = dims.append("time", DimSize::UNLIMITED).unwrap();
        let b = dims.append("lat", DimSize::new(90)).unwrap();
        let c = dims.append("lon", DimSize::new(180)).unwrap();
        assert_eq!((a.raw(), b.raw(), c.raw()), (0, 1, 2));
        assert_eq!(dims.len(), 3);
        assert_eq!(dims.capacity(), ARRAY_GROWBY);
    }

    #[test]
    fn append_rejects_taken_name() {
        let mut dims = make_array(&[("x", 1)]);
        let err = dims.append("x", DimSize::new(2)).unwrap_err();
        assert_eq!(err, DimError::NameInUse("x".into()));
        assert_eq!(dims.len(), 1);

        dims.append("y", DimSize::new(2)).unwrap();
        dims.rename(DimId::new(1), "z", RenameMode::Define).unwrap();
        assert_eq!(dims.find_by_name("x").unwrap(), Some(DimId::new(0)));
    }

    #[test]
    fn append_rejects_taken_name_after_normalization() {
        let mut dims = make_array(&[("\u{e9}", 1)]);
        let err = dims.append("e\u{301}", DimSize::new(2)).unwrap_err();
        assert!(matches!(err, DimError::NameInUse(_)));
        assert_eq!(dims.len(), 1);
    }

    #[test]
    fn append_rejects_second_unlimited() {
        let mut dims = DimArray::new();
        dims.append("t1", DimSize::UNLIMITED).unwrap();
        let err = dims.append("t2", DimSize::UNLIMITED).unwrap_err();
        assert_eq!(err, DimError::Unlimit);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims.find_by_name("t2").unwrap(), None);
    }

    #[test]
    fn capacity_grows_in_steps() {
        let mut dims = DimArray::new();
        for i in 0..ARRAY_GROWBY {
            dims.append(format!("d{i}"), DimSize::new(1)).unwrap();
        }
        assert_eq!(dims.capacity(), ARRAY_GROWBY);

        dims.append("extra", DimSize::new(1)).unwrap();
        assert_eq!(dims.capacity(), 2 * ARRAY_GROWBY);
    }

    #[test]
    fn lookup_by_name_and_position() {
        let dims = make_array(&[("x", 3), ("y", 4)]);
        let y = dims.find_by_name("y").unwrap().unwrap();
        assert_eq!(y, DimId::new(1));
        let dim = dims.get(y).unwrap();
        assert_eq!(dim.name().as_str(), "y");
        assert_eq!(dim.size().get(), 4);
    }

    #[test]
    fn lookup_normalizes_the_query() {
        let dims = make_array(&[("\u{e9}t\u{e9}", 2)]);
        let found = dims.find_by_name("e\u{301}te\u{301}").unwrap();
        assert_eq!(found, Some(DimId::new(0)));
    }

    #[test]
    fn lookup_rejects_invalid_utf8() {
        let dims = make_array(&[("x", 1)]);
        assert!(matches!(
            dims.find_by_name(b"\xc0"),
            Err(DimError::Encoding(_))
        ));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let dims = make_array(&[("x", 1)]);
        assert!(dims.get(DimId::new(1)).is_none());
        assert!(dims.get(DimId::new(-1)).is_none());
        assert!(dims.get(DimId::new(i32::MAX)).is_none());
    }

    #[test]
    fn find_unlimited_returns_record_dimension() {
        let dims = make_array(&[("lat", 10), ("time", 0), ("lon", 20)]);
        let (id, dim) = dims.find_unlimited().unwrap();
        assert_eq!(id, DimId::new(1));
        assert_eq!(dim.name().as_str(), "time");
    }

    #[test]
    fn rename_in_define_mode_may_grow() {
        let mut dims = make_array(&[("a", 10)]);
        dims.rename(DimId::new(0), "a_much_longer_name", RenameMode::Define)
            .unwrap();

        assert_eq!(dims.find_by_name("a").unwrap(), None);
        assert_eq!(
            dims.find_by_name("a_much_longer_name").unwrap(),
            Some(DimId::new(0))
        );
        let dim = dims.get(DimId::new(0)).unwrap();
        assert_eq!(dim.size().get(), 10);
        assert_eq!(dim.name().capacity(), 18);
    }

    #[test]
    fn rename_in_place_within_capacity() {
        let mut dims = make_array(&[("latitude", 10)]);
        dims.rename(DimId::new(0), "lat", RenameMode::InPlace).unwrap();
        assert_eq!(dims.get(DimId::new(0)).unwrap().name().as_str(), "lat");
        assert_eq!(dims.get(DimId::new(0)).unwrap().name().capacity(), 8);
        assert_eq!(dims.find_by_name("lat").unwrap(), Some(DimId::new(0)));
        assert_eq!(dims.find_by_name("latitude").unwrap(), None);
    }

    #[test]
    fn rename_in_place_too_long_changes_nothing() {
        let mut dims = make_array(&[("x", 10)]);
        let err = dims
            .rename(DimId::new(0), "longer", RenameMode::InPlace)
            .unwrap_err();
        assert_eq!(
            err,
            DimError::CapacityExceeded {
                needed: 6,
                capacity: 1
            }
        );
        assert_eq!(dims.find_by_name("x").unwrap(), Some(DimId::new(0)));
        assert_eq!(dims.find_by_name("longer").unwrap(), None);
    }

    #[test]
    fn rename_to_taken_name_fails() {
        let mut dims = make_array(&[("a", 1), ("b", 2)]);
        let err = dims
            .rename(DimId::new(0), "b", RenameMode::Define)
            .unwrap_err();
        assert_eq!(err, DimError::NameInUse("b".into()));
        assert_eq!(snapshot(&dims), vec![(0, "a".into(), 1), (1, "b".into(), 2)]);
    }

    #[test]
    fn rename_to_own_name_is_noop() {
        let mut dims = make_array(&[("a", 1)]);
        dims.rename(DimId::new(0), "a", RenameMode::InPlace).unwrap();
        assert_eq!(dims.find_by_name("a").unwrap(), Some(DimId::new(0)));
    }

    #[test]
    fn rename_missing_position_fails() {
        let mut dims = make_array(&[("a", 1)]);
        assert_eq!(
            dims.rename(DimId::new(5), "z", RenameMode::Define),
            Err(DimError::NotFound(DimId::new(5)))
        );
        assert_eq!(
            dims.rename(DimId::new(-2), "z", RenameMode::Define),
            Err(DimError::NotFound(DimId::new(-2)))
        );
        assert_eq!(dims.find_by_name("z").unwrap(), None);
    }

    #[test]
    fn rename_to_prefix_of_old_name() {
        // The old mapping must be gone before the new one goes in.
        let mut dims = make_array(&[("abc", 1)]);
        dims.rename(DimId::new(0), "ab", RenameMode::InPlace).unwrap();
        dims.rename(DimId::new(0), "abc", RenameMode::InPlace).unwrap();
        assert_eq!(dims.find_by_name("abc").unwrap(), Some(DimId::new(0)));
        assert_eq!(dims.find_by_name("ab").unwrap(), None);
    }

    #[test]
    fn duplicate_is_deep_and_independent() {
        let mut original = make_array(&[("time", 0), ("lat", 90), ("lon", 180)]);
        let mut copy = original.duplicate().unwrap();
        assert_eq!(snapshot(&copy), snapshot(&original));
        assert_eq!(copy.capacity(), 3);

        original
            .rename(DimId::new(1), "y", RenameMode::Define)
            .unwrap();
        assert_eq!(copy.get(DimId::new(1)).unwrap().name().as_str(), "lat");
        assert_eq!(copy.find_by_name("lat").unwrap(), Some(DimId::new(1)));

        copy.rename(DimId::new(2), "x", RenameMode::Define).unwrap();
        assert_eq!(original.get(DimId::new(2)).unwrap().name().as_str(), "lon");
    }

    #[test]
    fn duplicate_then_append_grows_from_exact_size() {
        let original = make_array(&[("a", 1), ("b", 2)]);
        let mut copy = original.duplicate().unwrap();
        let id = copy.append("c", DimSize::new(3)).unwrap();
        assert_eq!(id, DimId::new(2));
        assert_eq!(copy.capacity(), 2 + ARRAY_GROWBY);
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn duplicate_of_empty() {
        let copy = DimArray::new().duplicate().unwrap();
        assert!(copy.is_empty());
        assert_eq!(copy.find_by_name("a").unwrap(), None);
    }

    #[test]
    fn clear_keeps_capacity_teardown_releases() {
        let mut dims = make_array(&[("a", 1), ("b", 2)]);
        dims.clear();
        assert!(dims.is_empty());
        assert_eq!(dims.capacity(), ARRAY_GROWBY);
        assert_eq!(dims.find_by_name("a").unwrap(), None);

        let id = dims.append("a", DimSize::new(5)).unwrap();
        assert_eq!(id, DimId::new(0));
        assert_eq!(dims.find_by_name("a").unwrap(), Some(id));

        dims.teardown();
        assert!(dims.is_empty());
        assert_eq!(dims.capacity(), 0);
    }

    #[test]
    fn failed_index_reservation_leaves_no_dimension() {
        set_reserve_budget(2);
        let mut dims: DimArray<FlakyIndex> = DimArray::empty();
        dims.append("a", DimSize::new(1)).unwrap();
        dims.append("b", DimSize::new(2)).unwrap();

        let err = dims.append("c", DimSize::new(3)).unwrap_err();
        assert_eq!(err, DimError::OutOfMemory);
        assert_eq!(dims.len(), 2);
        assert_eq!(dims.find_by_name("c").unwrap(), None);
        assert_eq!(dims.find_by_name("b").unwrap(), Some(DimId::new(1)));
    }

    #[test]
    fn failed_duplicate_returns_nothing() {
        set_reserve_budget(usize::MAX);
        let mut source: DimArray<FlakyIndex> = DimArray::empty();
        for name in ["a", "b", "c"] {
            source.append(name, DimSize::new(1)).unwrap();
        }

        // Rebuilding the copy's index needs one reservation per name.
        set_reserve_budget(2);
        assert_eq!(source.duplicate().unwrap_err(), DimError::OutOfMemory);

        set_reserve_budget(usize::MAX);
        let copy = source.duplicate().unwrap();
        assert_eq!(snapshot(&copy), snapshot(&source));
    }

    #[test]
    fn serializes_in_position_order() {
        let dims = make_array(&[("time", 0), ("lat", 2)]);
        let json = serde_json::to_string(&dims).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"time","size":0},{"name":"lat","size":2}]"#
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ids_are_contiguous_and_resolvable(n in 0usize..64) {
                let mut dims = DimArray::new();
                for i in 0..n {
                    let id = dims.append(format!("dim{i}"), DimSize::new(i as u64 + 1)).unwrap();
                    prop_assert_eq!(id.raw(), i as i32);
                }
                prop_assert_eq!(dims.len(), n);
                prop_assert!(dims.capacity() >= n);
                prop_assert_eq!(dims.capacity() % ARRAY_GROWBY, 0);
                for i in 0..n {
                    let id = dims.find_by_name(format!("dim{i}")).unwrap().unwrap();
                    prop_assert_eq!(id.raw(), i as i32);
                    prop_assert_eq!(dims.get(id).unwrap().size().get(), i as u64 + 1);
                }
            }

            #[test]
            fn renames_keep_index_consistent(
                renames in proptest::collection::vec((0usize..8, "[a-z]{1,6}"), 0..32)
            ) {
                let mut dims = DimArray::new();
                for i in 0..8 {
                    dims.append(format!("init_{i}"), DimSize::new(1)).unwrap();
                }
                for (pos, name) in renames {
                    let _ = dims.rename(DimId::new(pos as i32), &name, RenameMode::Define);
                }
                let mut seen = std::collections::HashSet::new();
                for (id, dim) in dims.iter() {
                    prop_assert!(seen.insert(dim.name().to_string()));
                    prop_assert_eq!(dims.find_by_name(dim.name().as_str()).unwrap(), Some(id));
                }
            }

            #[test]
            fn duplicate_matches_source(names in proptest::collection::hash_set("[a-z]{1,8}", 0..24)) {
                let mut dims = DimArray::new();
                for (i, name) in names.iter().enumerate() {
                    dims.append(name, DimSize::new(i as u64)).unwrap();
                }
                let copy = dims.duplicate().unwrap();
                prop_assert_eq!(snapshot(&copy), snapshot(&dims));
                for (id, dim) in dims.iter() {
                    prop_assert_eq!(copy.find_by_name(dim.name().as_str()).unwrap(), Some(id));
                }
            }
        }
    }
}
