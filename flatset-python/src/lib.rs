use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;

use flatset_core::FlatSet;

/// Sorted set of Python ints stored in a contiguous array.
///
/// `add`, `remove`, `in`, `len()` and iteration behave like a built-in
/// `set`; iteration yields the keys in ascending order as they were when
/// `iter()` was called. The lower-level methods return positions into
/// the sorted storage, with `len(s)` as the end position.
#[pyclass(name = "flatset")]
#[derive(Clone, Default)]
pub struct FlatIntSet {
    inner: FlatSet<i64>,
}

#[pymethods]
impl FlatIntSet {
    #[new]
    #[pyo3(signature = (iterable=None))]
    fn new(iterable: Option<Vec<i64>>) -> Self {
        let inner: FlatSet<i64> = iterable.map(FlatSet::from).unwrap_or_default();
        FlatIntSet { inner }
    }

    fn add(&mut self, key: i64) {
        self.inner.insert(key);
    }

    fn remove(&mut self, key: i64) {
        self.inner.erase(&key);
    }

    fn __contains__(&self, key: i64) -> bool {
        self.inner.count(&key) > 0
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __iter__(&self) -> FlatIntSetIter {
        FlatIntSetIter { keys: self.inner.as_slice().to_vec().into_iter() }
    }

    fn __getitem__(&self, pos: usize) -> PyResult<i64> {
        self.inner
            .get_at(pos)
            .copied()
            .ok_or_else(|| PyIndexError::new_err(format!("position {} out of range", pos)))
    }

    /// Returns `(position, inserted)`.
    fn insert(&mut self, key: i64) -> (usize, bool) {
        self.inner.insert(key)
    }

    #[pyo3(signature = (key, hint))]
    fn insert_hint(&mut self, key: i64, hint: usize) -> (usize, bool) {
        self.inner.insert_hint(hint, key)
    }

    /// Adds every key from `keys` in one batch.
    fn update(&mut self, keys: Vec<i64>) {
        self.inner.insert_iter(keys);
    }

    fn find(&self, key: i64) -> usize {
        self.inner.find(&key)
    }

    fn count(&self, key: i64) -> usize {
        self.inner.count(&key)
    }

    fn lower_bound(&self, key: i64) -> usize {
        self.inner.lower_bound(&key)
    }

    fn upper_bound(&self, key: i64) -> usize {
        self.inner.upper_bound(&key)
    }

    fn equal_range(&self, key: i64) -> (usize, usize) {
        let range = self.inner.equal_range(&key);
        (range.start, range.end)
    }

    fn swap(&mut self, mut other: PyRefMut<'_, Self>) {
        self.inner.swap(&mut other.inner);
    }

    /// Name of the ordering; keys are always ascending ints.
    fn key_comp(&self) -> &'static str {
        "less"
    }

    fn value_comp(&self) -> &'static str {
        self.key_comp()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        let keys: Vec<String> = self.inner.iter().map(i64::to_string).collect();
        format!("flatset([{}])", keys.join(", "))
    }
}

/// Iterator over a snapshot of a `flatset`.
#[pyclass]
pub struct FlatIntSetIter {
    keys: std::vec::IntoIter<i64>,
}

#[pymethods]
impl FlatIntSetIter {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<i64> {
        slf.keys.next()
    }
}

#[pymodule]
fn flatset(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FlatIntSet>()?;
    m.add_class::<FlatIntSetIter>()?;
    Ok(())
}
