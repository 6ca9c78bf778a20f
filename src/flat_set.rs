//! An ordered set backed by a sorted, duplicate-free `Vec<K>`.
//!
//! Lookups are binary searches over contiguous memory; insertions and
//! erasures shift the tail of the vector. For read-heavy sets, or sets that
//! are built in bulk, this beats a pointer-based tree on cache behaviour.
//!
//! # Positions
//!
//! Positions are plain offsets into the sorted storage. `begin()` is 0 and
//! `end()` equals `len()`; lookups that find nothing return `end()`.
//!
//! A position is only meaningful until the next mutation:
//! - inserting at position `p` shifts every position `>= p` up by one,
//! - erasing at `p` (or a range starting at `p`) shifts every later position
//!   down, so positions `>= p` no longer name the same key,
//! - positions `< p` are unaffected by either,
//! - bulk insertion, `retain`, `clear` and `swap` invalidate all positions.
//!
//! Borrowed references into the set cannot outlive a mutation at all; the
//! borrow checker rejects that statically.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Bound, Index, Range, RangeBounds};
use core::slice;
use std::vec;

use log::trace;

use crate::compare::{Compare, Less};

#[derive(Clone)]
pub struct FlatSet<K, C = Less> {
    elems: Vec<K>,
    cmp: C,
}

impl<K, C: Default> Default for FlatSet<K, C> {
    fn default() -> Self {
        Self { elems: Vec::new(), cmp: C::default() }
    }
}

impl<K: Ord> FlatSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Less)
    }
}

impl<K, C: Compare<K>> FlatSet<K, C> {
    /// Creates an empty set ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self { elems: Vec::new(), cmp }
    }

    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self { elems: Vec::with_capacity(capacity), cmp }
    }

    /// Builds a set from arbitrary keys ordered by `cmp`.
    ///
    /// Of several mutually equivalent keys, the first one yielded by `iter`
    /// is kept.
    pub fn from_iter_with<I: IntoIterator<Item = K>>(iter: I, cmp: C) -> Self {
        Self::from_vec_with(iter.into_iter().collect(), cmp)
    }

    /// Like [`from_iter_with`](Self::from_iter_with), reusing `elems` as the
    /// backing storage.
    pub fn from_vec_with(mut elems: Vec<K>, cmp: C) -> Self {
        let given = elems.len();
        sort_unique(&mut elems, &cmp);
        trace!("flat set built from {} keys, {} unique", given, elems.len());
        let set = Self { elems, cmp };
        set.debug_check();
        set
    }

    #[inline]
    pub fn len(&self) -> usize { self.elems.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.elems.is_empty() }

    /// Upper limit on the number of keys the backing vector can address.
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / core::mem::size_of::<K>().max(1)
    }

    pub fn capacity(&self) -> usize { self.elems.capacity() }

    pub fn reserve(&mut self, additional: usize) {
        self.elems.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.elems.shrink_to_fit();
    }

    pub fn key_comp(&self) -> &C { &self.cmp }

    /// Same as [`key_comp`](Self::key_comp): keys are the values of a set.
    pub fn value_comp(&self) -> &C { &self.cmp }

    #[inline]
    pub fn begin(&self) -> usize { 0 }

    /// The end sentinel, one past the last key.
    #[inline]
    pub fn end(&self) -> usize { self.elems.len() }

    /// Iterates in ascending comparator order; `.rev()` gives descending.
    pub fn iter(&self) -> slice::Iter<'_, K> {
        self.elems.iter()
    }

    pub fn as_slice(&self) -> &[K] { &self.elems }

    pub fn into_vec(self) -> Vec<K> { self.elems }

    pub fn first(&self) -> Option<&K> { self.elems.first() }

    pub fn last(&self) -> Option<&K> { self.elems.last() }

    /// The key at `pos`, or `None` for `end()` and beyond.
    pub fn get_at(&self, pos: usize) -> Option<&K> {
        self.elems.get(pos)
    }

    /// First position whose key is not ordered before `key`.
    pub fn lower_bound(&self, key: &K) -> usize {
        self.elems.partition_point(|e| self.cmp.less(e, key))
    }

    /// First position whose key is ordered after `key`.
    pub fn upper_bound(&self, key: &K) -> usize {
        self.elems.partition_point(|e| !self.cmp.less(key, e))
    }

    /// Positions of the keys equivalent to `key`: empty or a single slot.
    pub fn equal_range(&self, key: &K) -> Range<usize> {
        match self.search(key) {
            Ok(pos) => pos..pos + 1,
            Err(pos) => pos..pos,
        }
    }

    /// Position of the key equivalent to `key`, or `end()`.
    pub fn find(&self, key: &K) -> usize {
        self.search(key).unwrap_or_else(|_| self.end())
    }

    pub fn get(&self, key: &K) -> Option<&K> {
        self.search(key).ok().map(|pos| &self.elems[pos])
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// 1 if an equivalent key is present, else 0.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains(key))
    }

    /// Iterates over the keys falling within `range`, in order.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> slice::Iter<'_, K> {
        let start = match range.start_bound() {
            Bound::Included(k) => self.lower_bound(k),
            Bound::Excluded(k) => self.upper_bound(k),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(k) => self.upper_bound(k),
            Bound::Excluded(k) => self.lower_bound(k),
            Bound::Unbounded => self.elems.len(),
        };
        self.elems[start..end.max(start)].iter()
    }

    /// Inserts `value` unless an equivalent key is already present.
    ///
    /// Returns the position of the key now in the set and whether `value`
    /// was inserted. A rejected `value` is dropped and the set is untouched.
    pub fn insert(&mut self, value: K) -> (usize, bool) {
        match self.search(&value) {
            Ok(pos) => (pos, false),
            Err(pos) => (self.insert_at(pos, value), true),
        }
    }

    /// Inserts `value`, trying position `hint` before searching.
    ///
    /// When `hint` is exactly where `value` belongs (everything before it is
    /// less, everything from it on is greater) the binary search is skipped.
    /// Appending in ascending order with `hint = end()` is then amortized
    /// O(1). Any other hint falls back to [`insert`](Self::insert); the
    /// resulting set is the same either way.
    pub fn insert_hint(&mut self, hint: usize, value: K) -> (usize, bool) {
        match self.check_hint(hint, &value) {
            Some(Ok(pos)) => (pos, false),
            Some(Err(pos)) => (self.insert_at(pos, value), true),
            None => self.insert(value),
        }
    }

    /// Builds a key from `args` and inserts it.
    ///
    /// The key is always constructed, even when an equivalent key is
    /// already present; it is then dropped.
    pub fn emplace<A: Into<K>>(&mut self, args: A) -> (usize, bool) {
        self.insert(args.into())
    }

    pub fn emplace_hint<A: Into<K>>(&mut self, hint: usize, args: A) -> (usize, bool) {
        self.insert_hint(hint, args.into())
    }

    /// Inserts every key from `iter` in one pass.
    ///
    /// The new keys are sorted and deduplicated among themselves, appended,
    /// and merged with the resident keys. Resident keys win over equivalent
    /// new ones. Invalidates all positions.
    pub fn insert_iter<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        let mut tail: Vec<K> = iter.into_iter().collect();
        if tail.is_empty() {
            return;
        }
        let given = tail.len();
        let resident = self.elems.len();
        let cmp = &self.cmp;
        sort_unique(&mut tail, cmp);

        let append_only = match (self.elems.last(), tail.first()) {
            (Some(max), Some(min)) => cmp.less(max, min),
            _ => true,
        };
        self.elems.append(&mut tail);
        if !append_only {
            // Two presorted runs: the stable sort merges them in linear time
            // and keeps resident keys ahead of equivalent new ones.
            sort_unique(&mut self.elems, cmp);
        }
        trace!(
            "flat set bulk insert: {} resident, {} given, {} after merge (append_only={})",
            resident,
            given,
            self.elems.len(),
            append_only
        );
        self.debug_check();
    }

    /// Removes the key at `pos` and returns the position of the key that
    /// followed it.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn erase_at(&mut self, pos: usize) -> usize {
        self.elems.remove(pos);
        pos
    }

    /// Removes the key equivalent to `key`. Returns how many keys were
    /// removed, 0 or 1.
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.take(key).is_some())
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.erase(key) == 1
    }

    /// Removes and returns the key equivalent to `key`.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let pos = self.search(key).ok()?;
        Some(self.elems.remove(pos))
    }

    /// Removes the keys at the positions in `range` and returns the first
    /// position after the removed span.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        self.elems.drain(range);
        start
    }

    /// Keeps only the keys for which `f` returns true.
    pub fn retain<F: FnMut(&K) -> bool>(&mut self, f: F) {
        self.elems.retain(f);
    }

    pub fn pop_first(&mut self) -> Option<K> {
        if self.elems.is_empty() {
            None
        } else {
            Some(self.elems.remove(0))
        }
    }

    pub fn pop_last(&mut self) -> Option<K> {
        self.elems.pop()
    }

    /// Removes every key. The comparator and the allocation are kept.
    pub fn clear(&mut self) {
        self.elems.clear();
    }

    /// Exchanges contents and comparators with `other` without touching
    /// the keys.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// `Ok(pos)` of the equivalent key, or `Err(pos)` where `key` belongs.
    fn search(&self, key: &K) -> Result<usize, usize> {
        let pos = self.lower_bound(key);
        match self.elems.get(pos) {
            Some(e) if !self.cmp.less(key, e) => Ok(pos),
            _ => Err(pos),
        }
    }

    /// Resolves an insertion hint using only the hint's neighbours.
    ///
    /// `Some(Err(hint))` if `value` belongs exactly at `hint`, `Some(Ok(pos))`
    /// if a neighbour is equivalent to `value`, `None` if the hint is wrong.
    fn check_hint(&self, hint: usize, value: &K) -> Option<Result<usize, usize>> {
        if hint > self.elems.len() {
            return None;
        }
        if hint > 0 {
            let prev = &self.elems[hint - 1];
            if !self.cmp.less(prev, value) {
                return if self.cmp.less(value, prev) { None } else { Some(Ok(hint - 1)) };
            }
        }
        if let Some(next) = self.elems.get(hint) {
            if !self.cmp.less(value, next) {
                return if self.cmp.less(next, value) { None } else { Some(Ok(hint)) };
            }
        }
        Some(Err(hint))
    }

    fn insert_at(&mut self, pos: usize, value: K) -> usize {
        self.elems.insert(pos, value);
        self.debug_check();
        pos
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.elems.windows(2).all(|w| self.cmp.less(&w[0], &w[1])),
            "flat set storage is not strictly increasing"
        );
    }
}

/// Stable sort, then collapse runs of equivalent keys to their first member.
fn sort_unique<K, C: Compare<K>>(elems: &mut Vec<K>, cmp: &C) {
    elems.sort_by(|a, b| cmp.compare(a, b));
    elems.dedup_by(|later, kept| cmp.equivalent(later, kept));
}

impl<K, C> Index<usize> for FlatSet<K, C> {
    type Output = K;

    fn index(&self, pos: usize) -> &K {
        &self.elems[pos]
    }
}

// Comparisons look at the key sequences only, never at the comparators.

impl<K: PartialEq, C1, C2> PartialEq<FlatSet<K, C2>> for FlatSet<K, C1> {
    fn eq(&self, other: &FlatSet<K, C2>) -> bool {
        self.elems == other.elems
    }
}

impl<K: Eq, C> Eq for FlatSet<K, C> {}

impl<K: PartialOrd, C1, C2> PartialOrd<FlatSet<K, C2>> for FlatSet<K, C1> {
    fn partial_cmp(&self, other: &FlatSet<K, C2>) -> Option<Ordering> {
        self.elems.as_slice().partial_cmp(other.elems.as_slice())
    }
}

impl<K: Ord, C> Ord for FlatSet<K, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.elems.cmp(&other.elems)
    }
}

impl<K: Hash, C> Hash for FlatSet<K, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elems.hash(state);
    }
}

impl<K: fmt::Debug, C> fmt::Debug for FlatSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elems.iter()).finish()
    }
}

impl<K, C: Compare<K> + Default> FromIterator<K> for FlatSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}

impl<K: Ord> From<Vec<K>> for FlatSet<K> {
    fn from(elems: Vec<K>) -> Self {
        Self::from_vec_with(elems, Less)
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for FlatSet<K> {
    fn from(keys: [K; N]) -> Self {
        Self::from_vec_with(Vec::from(keys), Less)
    }
}

impl<K, C: Compare<K>> Extend<K> for FlatSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_iter(iter);
    }
}

impl<'a, K: Copy + 'a, C: Compare<K>> Extend<&'a K> for FlatSet<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.insert_iter(iter.into_iter().copied());
    }
}

impl<K, C> IntoIterator for FlatSet<K, C> {
    type Item = K;
    type IntoIter = vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.into_iter()
    }
}

impl<'a, K, C> IntoIterator for &'a FlatSet<K, C> {
    type Item = &'a K;
    type IntoIter = slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}
