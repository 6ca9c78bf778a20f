//! Ordering policies for [`FlatSet`](crate::FlatSet).
//!
//! A comparator is a strict weak ordering expressed as a `less` predicate.
//! Equivalence is always derived from it: two keys are equivalent when
//! neither is less than the other. Key equality (`PartialEq`) is never
//! consulted when deciding whether a key is already present.

use core::cmp::Ordering;

/// A strict weak ordering over `K`.
///
/// Implementations must be irreflexive and transitive, and equivalence
/// (`!less(a, b) && !less(b, a)`) must be transitive as well. A comparator
/// that breaks these rules leaves the set in an unspecified (but memory
/// safe) order.
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Three-way comparison built from two `less` calls.
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Ascending order by `Ord`. The default comparator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order by `Ord`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a > b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Orders keys by a projection, e.g. `ByKey(|p: &Person| p.age)`.
///
/// Keys whose projections compare equal are equivalent, so a set using this
/// comparator holds at most one key per projected value.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByKey<F>(pub F);

impl<K, T, F> Compare<K> for ByKey<F>
where
    K: ?Sized,
    T: Ord,
    F: Fn(&K) -> T,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a) < (self.0)(b)
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a).cmp(&(self.0)(b))
    }
}

impl<K, F> Compare<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn less_and_greater_are_mirrored() {
        assert!(Compare::<i32>::less(&Less, &1, &2));
        assert!(!Compare::<i32>::less(&Less, &2, &2));
        assert!(Compare::<i32>::less(&Greater, &2, &1));
        assert_eq!(Compare::<i32>::compare(&Greater, &1, &2), Ordering::Greater);
        assert!(Compare::<str>::less(&Less, "abc", "abd"));
    }

    #[test]
    fn equivalence_comes_from_the_ordering() {
        // Case-insensitive ordering: "a" and "A" are equivalent though unequal.
        let ci = |a: &String, b: &String| a.to_lowercase() < b.to_lowercase();
        let a = "a".to_string();
        let upper = "A".to_string();
        assert_ne!(a, upper);
        assert!(ci.equivalent(&a, &upper));
        assert_eq!(ci.compare(&a, &"b".to_string()), Ordering::Less);
    }

    #[test]
    fn projection_comparator() {
        let by_abs = ByKey(|v: &i64| v.abs());
        assert!(by_abs.less(&1, &-2));
        assert!(by_abs.equivalent(&-3, &3));
        assert_eq!(by_abs.compare(&-5, &4), Ordering::Greater);
    }
}
