//! Equatable Sequences
//!
//! `EqSeq<T>` is the only collection type allowed inside cached values.
//! It wraps an immutable, shared backing store and compares by content:
//! two independently built sequences with the same elements in the same
//! order are equal and hash equal.
//!
//! # Hashing
//!
//! ```text
//! h = 0
//! for item in seq: h = h * 31 + fx_hash(item)   (wrapping)
//! ```
//!
//! The fold is positional, so permutations of the same elements hash
//! differently and can never produce a false cache hit. An empty sequence
//! hashes to [`EqSeq::EMPTY_HASH`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops::Index;
use std::sync::Arc;

use rustc_hash::FxBuildHasher;

/// Multiplier of the positional hash combine.
const HASH_MULTIPLIER: u64 = 31;

/// An immutable sequence with positional value equality.
///
/// Clones share the backing store; there is no mutation API. Transformations
/// build a new sequence through `FromIterator`.
pub struct EqSeq<T> {
    items: Arc<[T]>,
}

impl<T> EqSeq<T> {
    /// Hash of every empty sequence.
    pub const EMPTY_HASH: u64 = 0;

    /// Create an empty sequence.
    pub fn empty() -> Self {
        EqSeq {
            items: Arc::from(Vec::new()),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Hash> EqSeq<T> {
    /// Order-sensitive combined hash of the elements.
    pub fn content_hash(&self) -> u64 {
        self.items.iter().fold(Self::EMPTY_HASH, |acc, item| {
            acc.wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(FxBuildHasher.hash_one(item))
        })
    }
}

impl<T> Clone for EqSeq<T> {
    fn clone(&self) -> Self {
        EqSeq {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for EqSeq<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for EqSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items) || self.items[..] == other.items[..]
    }
}

impl<T: Eq> Eq for EqSeq<T> {}

impl<T: Hash> Hash for EqSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl<T: PartialOrd> PartialOrd for EqSeq<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.items[..].partial_cmp(&other.items[..])
    }
}

impl<T: Ord> Ord for EqSeq<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.items[..].cmp(&other.items[..])
    }
}

impl<T: fmt::Debug> fmt::Debug for EqSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> From<Vec<T>> for EqSeq<T> {
    fn from(items: Vec<T>) -> Self {
        EqSeq {
            items: Arc::from(items),
        }
    }
}

impl<T> FromIterator<T> for EqSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a, T> IntoIterator for &'a EqSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for EqSeq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}
