//! Ordered sets stored in a single sorted `Vec` instead of a tree.
//!
//! [`FlatSet`] keeps its keys sorted and unique under a [`Compare`]
//! policy. Lookups are binary searches; inserts and erases move the tail
//! of the vector. The API mirrors a tree-based ordered set, with plain
//! `usize` positions standing in for tree iterators.
//!
//! ```
//! use flatset::FlatSet;
//!
//! let mut s = FlatSet::from([5, 1, 3]);
//! assert_eq!(s.insert(2), (1, true));
//! assert_eq!(s.insert(3), (2, false));
//! assert_eq!(s.as_slice(), &[1, 2, 3, 5]);
//! assert_eq!(s[s.lower_bound(&4)], 5);
//! ```

pub mod compare;
pub mod flat_set;

pub use compare::{ByKey, Compare, Greater, Less};
pub use flat_set::FlatSet;

