// inplace - inplace-foundation
// Module: FixedMap - Inline-storage associative array
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001, REQ_TEMPORAL_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Key-value map with inline storage and compile-time capacity.
//!
//! `FixedMap<K, V, N>` stores up to `N` `(key, value)` pairs in a
//! [`FixedVec`] in insertion order. Lookup is a linear scan, which for the
//! small `N` this map is meant for beats hashing or binary search and only
//! needs `K: PartialEq`.
//!
//! # Characteristics
//!
//! - **Zero allocation**: all memory is inline
//! - **O(n) lookup**: linear scan with `==`
//! - **Unique keys**: `count(key)` is always 0 or 1
//! - **Insertion order**: iteration yields entries in the order inserted,
//!   except that erasing shifts later entries down

use core::{fmt, iter::FusedIterator, slice};

use inplace_error::{kinds, Error, Result};

use super::FixedVec;

/// A map with compile-time capacity and linear lookup.
///
/// # Invariants
///
/// 1. `len <= N` always holds
/// 2. No two entries have equal keys
///
/// # Examples
///
/// ```
/// use inplace_foundation::collections::FixedMap;
///
/// let mut map = FixedMap::<&str, u32, 2>::new();
/// assert!(map.insert("a", 1)?);
/// assert!(!map.insert("a", 2)?); // duplicate key, map unchanged
/// assert!(map.insert("b", 2)?);
/// assert!(map.insert("c", 3).is_err()); // full
///
/// assert_eq!(map.count(&"a"), 1);
/// assert_eq!(map.erase(&"a"), 1);
/// assert_eq!(map.erase(&"a"), 0);
/// # Ok::<(), inplace_foundation::Error>(())
/// ```
pub struct FixedMap<K, V, const N: usize> {
    /// Invariant: keys are pairwise distinct
    entries: FixedVec<(K, V), N>,
}

impl<K: PartialEq, V, const N: usize> FixedMap<K, V, N> {
    /// Creates a new empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: FixedVec::new() }
    }

    /// Inserts `key` with `value` if the key is absent.
    ///
    /// Returns `Ok(true)` if the entry was inserted and `Ok(false)` if the
    /// key already existed; in that case the stored value is kept and
    /// `value` is dropped.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the key is absent and the map is
    /// full.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        self.emplace(key, || value)
    }

    /// Like [`FixedMap::insert`], but only builds the value when the key is
    /// absent and there is room for it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the key is absent and the map is
    /// full.
    pub fn emplace<F>(&mut self, key: K, make_value: F) -> Result<bool>
    where
        F: FnOnce() -> V,
    {
        if self.position(&key).is_some() {
            return Ok(false);
        }
        self.push_new(key, make_value)?;
        Ok(true)
    }

    /// Inserts `key` with `value`, overwriting the value if the key exists.
    ///
    /// Returns `Ok(true)` if a new entry was inserted and `Ok(false)` if an
    /// existing value was overwritten.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the key is absent and the map is
    /// full.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<bool> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                Ok(false)
            }
            Entry::Vacant(entry) => entry.insert(value).map(|_| true),
        }
    }

    /// Overwrites the value of an existing key and returns the old value.
    ///
    /// # Errors
    ///
    /// Returns `Err(KeyNotFound)` if the key is absent; the map is left
    /// unchanged.
    pub fn assign(&mut self, key: &K, value: V) -> Result<V> {
        let slot = self.get_mut(key).ok_or_else(Self::key_error)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `Err(KeyNotFound)` if the key is absent.
    pub fn find(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or_else(Self::key_error)
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Returns the value for `key` mutably, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.position(key).map(|index| &mut self.entries[index].1)
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Returns 1 if the map contains `key`, otherwise 0.
    #[inline]
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Removes `key` and returns how many entries were removed (0 or 1).
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.remove(key).is_some())
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.position(key)?;
        self.entries.erase(index).ok().map(|(_, value)| value)
    }

    /// Removes the entry at position `index` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `Err(IndexOutOfBounds)` if `index >= len`.
    pub fn erase_at(&mut self, index: usize) -> Result<(K, V)> {
        self.entries.erase(index)
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use inplace_foundation::collections::FixedMap;
    ///
    /// let mut hits = FixedMap::<char, u32, 4>::new();
    /// for c in ['a', 'b', 'a'] {
    ///     *hits.entry(c).or_insert(0)? += 1;
    /// }
    /// assert_eq!(hits.get(&'a'), Some(&2));
    /// # Ok::<(), inplace_foundation::Error>(())
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, N> {
        match self.position(&key) {
            Some(index) => Entry::Occupied(OccupiedEntry { map: self, index }),
            None => Entry::Vacant(VacantEntry { map: self, key }),
        }
    }

    /// Drops every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Exchanges the contents of two maps.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.entries.swap(&mut other.entries);
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if the map is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the map is full.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Returns an iterator over the entries.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.entries.iter() }
    }

    /// Returns an iterator over the entries with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut { inner: self.entries.iter_mut() }
    }

    /// Returns an iterator over the keys.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns a mutable iterator over the values.
    #[inline]
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(candidate, _)| candidate == key)
    }

    fn push_new(&mut self, key: K, make_value: impl FnOnce() -> V) -> Result<usize> {
        if self.entries.is_full() {
            enter_span!(crate::tracing::ContainerTrace::rejected("FixedMap", N));
            trace_event!(DEBUG, container = "FixedMap", capacity = N, "capacity exceeded");
            return Err(kinds::capacity_error(N).into());
        }
        self.entries.push_back((key, make_value()))?;
        Ok(self.entries.len() - 1)
    }

    fn key_error() -> Error {
        kinds::KeyNotFoundError.into()
    }
}

/// A view into a single entry in a map, which may either be vacant or occupied.
pub enum Entry<'a, K: PartialEq, V, const N: usize> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, N>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, N>),
}

impl<'a, K: PartialEq, V, const N: usize> Entry<'a, K, V, N> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the entry is vacant and the map is
    /// full.
    pub fn or_insert(self, default: V) -> Result<&'a mut V> {
        match self {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the entry is vacant and the map is
    /// full.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> Result<&'a mut V> {
        match self {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any potential inserts.
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

/// A view into an occupied entry in a [`FixedMap`].
pub struct OccupiedEntry<'a, K: PartialEq, V, const N: usize> {
    map: &'a mut FixedMap<K, V, N>,
    index: usize,
}

impl<'a, K: PartialEq, V, const N: usize> OccupiedEntry<'a, K, V, N> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.map.entries[self.index].0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.map.entries[self.index].1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.entries[self.index].1
    }

    /// Converts the entry into a mutable reference to the value with the same lifetime as the map.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.entries[self.index].1
    }

    /// Sets the value of the entry and returns the entry's old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Takes the entry out of the map and returns it.
    ///
    /// # Errors
    ///
    /// Never fails for an entry obtained from [`FixedMap::entry`]; the
    /// `Result` comes from the positional erase underneath.
    pub fn remove_entry(self) -> Result<(K, V)> {
        self.map.entries.erase(self.index)
    }
}

/// A view into a vacant entry in a [`FixedMap`].
pub struct VacantEntry<'a, K: PartialEq, V, const N: usize> {
    map: &'a mut FixedMap<K, V, N>,
    key: K,
}

impl<'a, K: PartialEq, V, const N: usize> VacantEntry<'a, K, V, N> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the VacantEntry's key and returns a mutable reference to it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the map is full.
    pub fn insert(self, value: V) -> Result<&'a mut V> {
        let index = self.map.push_new(self.key, || value)?;
        Ok(&mut self.map.entries[index].1)
    }
}

impl<K, V, const N: usize> Default for FixedMap<K, V, N>
where
    K: PartialEq,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, const N: usize> Clone for FixedMap<K, V, N> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone() }
    }
}

// Equal when both maps hold the same key-value pairs, in any order.
impl<K: PartialEq, V: PartialEq, const N: usize> PartialEq for FixedMap<K, V, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Eq, V: Eq, const N: usize> Eq for FixedMap<K, V, N> {}

impl<K: fmt::Debug, V: fmt::Debug, const N: usize> fmt::Debug for FixedMap<K, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

/// Iterator over the entries of a [`FixedMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the entries of a [`FixedMap`] with mutable values.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

// IntoIterator for references
impl<'a, K: PartialEq, V, const N: usize> IntoIterator for &'a FixedMap<K, V, N> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_map_uniqueness() {
        let mut map: FixedMap<u8, u8, 3> = FixedMap::new();
        let keys: [u8; 4] = kani::any();
        for key in keys {
            let _ = map.insert(key, 0);
        }
        for key in keys {
            assert!(map.count(&key) <= 1);
        }
        assert!(map.len() <= 3);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use inplace_error::codes;

    use super::*;

    #[test]
    fn test_insert_duplicate_is_noop() -> Result<()> {
        let mut map = FixedMap::<u32, &str, 4>::new();
        assert!(map.insert(1, "one")?);
        assert!(!map.insert(1, "uno")?);
        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.len(), 1);
        Ok(())
    }

    #[test]
    fn test_capacity_exceeded() -> Result<()> {
        let mut map = FixedMap::<u8, u8, 2>::new();
        map.insert(1, 1)?;
        map.insert(2, 2)?;
        assert_eq!(map.insert(3, 3).unwrap_err().code, codes::CAPACITY_EXCEEDED);
        // A duplicate on a full map is still a plain no-op.
        assert!(!map.insert(2, 9)?);
        assert_eq!(map.len(), 2);
        Ok(())
    }

    #[test]
    fn test_insert_or_assign() -> Result<()> {
        let mut map = FixedMap::<&str, u32, 2>::new();
        assert!(map.insert_or_assign("x", 1)?);
        assert!(!map.insert_or_assign("x", 2)?);
        assert_eq!(map.find(&"x")?, &2);
        Ok(())
    }

    #[test]
    fn test_assign_requires_existing_key() -> Result<()> {
        let mut map = FixedMap::<u8, u8, 2>::new();
        assert_eq!(map.assign(&1, 5).unwrap_err().code, codes::KEY_NOT_FOUND);
        assert!(map.is_empty());
        map.insert(1, 1)?;
        assert_eq!(map.assign(&1, 5)?, 1);
        assert_eq!(map.get(&1), Some(&5));
        Ok(())
    }

    #[test]
    fn test_find_missing() {
        let map = FixedMap::<u8, u8, 2>::new();
        assert_eq!(map.find(&3).unwrap_err().code, codes::KEY_NOT_FOUND);
    }

    #[test]
    fn test_erase_and_count() -> Result<()> {
        let mut map = FixedMap::<u8, char, 4>::new();
        map.insert(1, 'a')?;
        map.insert(2, 'b')?;
        map.insert(3, 'c')?;
        assert_eq!(map.erase(&2), 1);
        assert_eq!(map.erase(&2), 0);
        assert_eq!(map.count(&2), 0);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(map.erase_at(0)?, (1, 'a'));
        assert!(map.erase_at(4).is_err());
        Ok(())
    }

    #[test]
    fn test_emplace_is_lazy() -> Result<()> {
        let mut map = FixedMap::<u8, u8, 1>::new();
        let mut calls = 0;
        map.emplace(1, || {
            calls += 1;
            10
        })?;
        map.emplace(1, || {
            calls += 1;
            20
        })?;
        assert_eq!(calls, 1);
        assert!(map.emplace(2, || 30).is_err());
        Ok(())
    }

    #[test]
    fn test_entry_api() -> Result<()> {
        let mut map = FixedMap::<&str, u32, 2>::new();
        *map.entry("a").or_insert(1)? += 10;
        map.entry("a").and_modify(|v| *v *= 2).or_insert_with(|| 0)?;
        assert_eq!(map.get(&"a"), Some(&22));
        map.entry("b").or_insert(0)?;
        assert!(map.entry("c").or_insert(0).is_err());
        if let Entry::Occupied(entry) = map.entry("a") {
            assert_eq!(entry.remove_entry()?, ("a", 22));
        }
        assert!(!map.contains_key(&"a"));
        Ok(())
    }

    #[test]
    fn test_equality_ignores_order() -> Result<()> {
        let mut a = FixedMap::<u8, u8, 3>::new();
        let mut b = FixedMap::<u8, u8, 3>::new();
        a.insert(1, 10)?;
        a.insert(2, 20)?;
        b.insert(2, 20)?;
        b.insert(1, 10)?;
        assert_eq!(a, b);
        b.assign(&1, 11)?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn test_swap_twice_restores() -> Result<()> {
        let mut a = FixedMap::<u8, u8, 2>::new();
        let mut b = FixedMap::<u8, u8, 2>::new();
        a.insert(1, 1)?;
        let (a0, b0) = (a.clone(), b.clone());
        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.get(&1), Some(&1));
        a.swap(&mut b);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
        Ok(())
    }

    #[test]
    fn test_values_mut() -> Result<()> {
        let mut map = FixedMap::<u8, u32, 3>::new();
        map.insert(1, 1)?;
        map.insert(2, 2)?;
        for value in map.values_mut() {
            *value *= 100;
        }
        assert_eq!(map.values().sum::<u32>(), 300);
        Ok(())
    }
}
