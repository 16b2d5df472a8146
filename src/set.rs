//! Sets of unique elements with union, intersection, and difference.

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

/// A set of unique elements with no meaningful order.
///
/// Backed by a persistent hash set with structural sharing, so the algebra
/// operations ([`union`](Self::union), [`intersect`](Self::intersect),
/// [`difference`](Self::difference)) hand back fresh sets without copying the
/// parts they share with their inputs. None of them ever modifies an operand.
///
/// `Set` is not synchronized: to mutate one from several threads, wrap it in
/// a lock of your own.
#[derive(Clone, Default)]
pub struct Set<T>(im::HashSet<T>)
where
    T: Clone + Eq + Hash;

impl<T: Clone + Eq + Hash> Set<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(im::HashSet::new())
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    /// Adds the value, returning true if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value).is_none()
    }

    /// Removes the value, returning true if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.0.remove(value).is_some()
    }

    /// Returns an iterator over the elements, in no meaningful order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Returns a new set with every element of this set and of all `others`.
    #[must_use]
    pub fn union<'a, I>(&'a self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut result = self.0.clone();
        for other in others {
            result = result.union(other.0.clone());
        }
        Self(result)
    }

    /// Returns a new set with the elements present in this set and in every
    /// one of `others`.
    ///
    /// With no comparison sets the result is empty, whatever this set
    /// contains: intersection here always requires at least one set to
    /// compare against.
    ///
    /// The smallest of the candidate sets (this one included) is scanned and
    /// each element membership-tested against the rest, so the work is
    /// bounded by the smallest operand.
    #[must_use]
    pub fn intersect<'a, I>(&'a self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut candidates: Vec<&Self> = others.into_iter().collect();
        if candidates.is_empty() {
            return Self::new();
        }
        candidates.push(self);

        let mut smallest = 0;
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.len() < candidates[smallest].len() {
                smallest = i;
            }
        }
        let base = candidates.swap_remove(smallest);

        Self(
            base.iter()
                .filter(|value| candidates.iter().all(|c| c.contains(value)))
                .cloned()
                .collect(),
        )
    }

    /// Returns a new set with the elements of this set that are not in
    /// `other`.
    ///
    /// Elements unique to `other` are ignored; `other` need not be a subset
    /// of this set. Neither set is modified.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|value| !other.0.contains(value))
                .cloned()
                .collect(),
        )
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Clone + Eq + Hash> Eq for Set<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(im::HashSet::from_iter(iter))
    }
}

impl<T: Clone + Eq + Hash> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = im::hashset::ConsumingIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
