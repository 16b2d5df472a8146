//! A thread-safe keyed map that preserves insertion order.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::RwLock;

use crate::Result;
use crate::error::Error;

/// A thread-safe generic map that preserves the insertion order of its
/// entries.
///
/// Keyed lookup, overwrite, and append are O(1); removal, prepend, and
/// reversal are O(n) because entry positions are kept dense and contiguous.
/// Values are copied in on insert and copied out on read, so the map owns its
/// contents exclusively.
///
/// All operations take `&self`: a single reader-writer lock over the whole
/// structure provides interior mutability, so a map shared behind an
/// [`Arc`](std::sync::Arc) may be read and written from many threads at once.
/// Read-only operations hold the shared lock, mutating operations the
/// exclusive lock, and no operation returns while holding either. Operations
/// panic if the lock was poisoned by a panicking writer.
///
/// The insert-only operations ([`push`](Self::push) and
/// [`prepend`](Self::prepend)) additionally require `K: Debug` so the
/// rejected key can be reported in the [`Error`].
pub struct OrderedMap<K, V> {
    inner: RwLock<Core<K, V>>,
}

/// The three coupled structures behind the lock.
///
/// `keys[&k]` is the position of `k`, `index[i]` is the key at position `i`,
/// and `values[i]` its value. All three always have equal length, and
/// positions are contiguous `0..n`.
#[derive(Clone)]
struct Core<K, V> {
    keys: HashMap<K, usize>,
    index: Vec<K>,
    values: Vec<V>,
}

impl<K: Clone + Eq + Hash, V> Core<K, V> {
    /// Appends a key known to be absent at the next position.
    fn append(&mut self, key: K, value: V) {
        let pos = self.values.len();
        self.keys.insert(key.clone(), pos);
        self.index.push(key);
        self.values.push(value);
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().values.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().values.is_empty()
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().unwrap().keys.contains_key(key)
    }

    /// Inserts the key-value pair, overwriting the value if the key is
    /// already present.
    ///
    /// Overwriting never moves a key: it keeps the position it was first
    /// inserted at. A new key is appended after all existing entries. To
    /// reject duplicates instead of overwriting, use [`push`](Self::push).
    pub fn set(&self, key: K, value: V) {
        let mut core = self.inner.write().unwrap();
        if let Some(pos) = core.keys.get(&key).copied() {
            core.values[pos] = value;
        } else {
            core.append(key, value);
        }
    }

    /// Appends the key-value pair after all existing entries.
    ///
    /// To overwrite existing values instead, use [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key is already present; the map
    /// is left untouched.
    pub fn push(&self, key: K, value: V) -> Result<()>
    where
        K: fmt::Debug,
    {
        let mut core = self.inner.write().unwrap();
        if core.keys.contains_key(&key) {
            return Err(Error::duplicate_key(&key));
        }
        core.append(key, value);
        Ok(())
    }

    /// Inserts the key-value pair at position 0.
    ///
    /// Every existing entry shifts one position to the right, so this is
    /// O(n).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key is already present; the map
    /// is left untouched.
    pub fn prepend(&self, key: K, value: V) -> Result<()>
    where
        K: fmt::Debug,
    {
        let mut core = self.inner.write().unwrap();
        if core.keys.contains_key(&key) {
            return Err(Error::duplicate_key(&key));
        }
        for pos in core.keys.values_mut() {
            *pos += 1;
        }
        core.keys.insert(key.clone(), 0);
        core.index.insert(0, key);
        core.values.insert(0, value);
        Ok(())
    }

    /// Returns a copy of the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let core = self.inner.read().unwrap();
        core.keys.get(key).map(|&pos| core.values[pos].clone())
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    ///
    /// Removing a missing key is a no-op, never an error. Remaining entries
    /// keep their relative order; every entry after the removed one shifts
    /// down a position, so this is O(n) in the worst case.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut core = self.inner.write().unwrap();
        let pos = core.keys.remove(key)?;
        core.index.remove(pos);
        let value = core.values.remove(pos);
        for p in core.keys.values_mut() {
            if *p > pos {
                *p -= 1;
            }
        }
        Some(value)
    }

    /// Calls `visit` for each entry in order, stopping as soon as it returns
    /// false.
    ///
    /// Stopping early is a normal completion, not an error. The shared lock
    /// is held for the whole traversal: `visit` must not call any mutating
    /// operation on this map, or the call deadlocks. To mutate during
    /// iteration, use [`range_snapshot`](Self::range_snapshot).
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let core = self.inner.read().unwrap();
        for (key, value) in core.index.iter().zip(&core.values) {
            if !visit(key, value) {
                return;
            }
        }
    }

    /// Like [`range`](Self::range), but iterates a point-in-time copy of the
    /// entries.
    ///
    /// The shared lock is held only while the copy is taken, so `visit` may
    /// freely call mutating operations on this map. Entries added, removed,
    /// or updated mid-traversal are not reflected in the snapshot being
    /// walked.
    pub fn range_snapshot<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (key, value) in self.entries() {
            if !visit(&key, &value) {
                return;
            }
        }
    }

    /// Returns a copy of the entries in their current order.
    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        let core = self.inner.read().unwrap();
        core.index
            .iter()
            .cloned()
            .zip(core.values.iter().cloned())
            .collect()
    }

    /// Returns a copy of the keys in their current order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().unwrap().index.clone()
    }

    /// Reverses the order of the entries in place.
    ///
    /// The entry at position `i` moves to position `n - 1 - i`. Maps with
    /// fewer than two entries are left as they are.
    pub fn reverse(&self) {
        let mut core = self.inner.write().unwrap();
        let n = core.values.len();
        if n < 2 {
            return;
        }
        for pos in core.keys.values_mut() {
            *pos = n - 1 - *pos;
        }
        core.index.reverse();
        core.values.reverse();
    }

    /// Returns a new map holding this map's entries followed by the entries
    /// of `others`, applied left to right with insert-or-overwrite semantics.
    ///
    /// A key keeps the position of its earliest source while a later source's
    /// value wins; a key first seen in a later source is appended after all
    /// prior entries. None of the source maps are modified, and the result
    /// shares no storage with any of them.
    #[must_use]
    pub fn concat<'a, I>(&'a self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let result = self.clone();
        for other in others {
            for (key, value) in other.entries() {
                result.set(key, value);
            }
        }
        result
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Core {
                keys: HashMap::new(),
                index: Vec::new(),
                values: Vec::new(),
            }),
        }
    }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        let core = self.inner.read().unwrap();
        Self {
            inner: RwLock::new(Core::clone(&core)),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read().unwrap();
        f.debug_map()
            .entries(core.index.iter().zip(&core.values))
            .finish()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<K>, std::vec::IntoIter<V>>;

    fn into_iter(self) -> Self::IntoIter {
        let core = self.inner.into_inner().unwrap();
        core.index.into_iter().zip(core.values)
    }
}
