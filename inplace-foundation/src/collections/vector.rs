// inplace - inplace-foundation
// Module: FixedVec - Inline-storage positional sequence
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001, REQ_LIFETIME_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for MaybeUninit operations (documented and verified via KANI)
#![allow(unsafe_code)]

//! Fixed-capacity vector with inline storage.
//!
//! `FixedVec<T, N>` is an ordered sequence of at most `N` elements stored
//! in the structure itself. Elements can be inserted and erased at any
//! position; the tail is relocated with an overlap-safe bitwise move so no
//! element is cloned or dropped during a shift.
//!
//! # Characteristics
//!
//! - **Zero allocation**: all memory is inline
//! - **O(1)**: `push_back`, `pop_back`, `len`, `is_full`, indexing
//! - **O(n)**: `insert`, `erase`, `find`
//! - **Explicit failure**: every capacity-bounded mutator returns `Result`
//! - **RAII cleanup**: exactly the live elements are dropped

use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::MaybeUninit,
    ops::{Deref, DerefMut, Range},
    slice,
};

use inplace_error::{kinds, Error, Result};

use crate::lifetime;

/// A vector with compile-time capacity and inline storage.
///
/// # Invariants
///
/// 1. `len <= N` always holds
/// 2. Slots `[0..len)` are initialized, slots `[len..N)` are not
/// 3. Every element constructed in a slot is dropped exactly once
///
/// # Examples
///
/// ```
/// use inplace_foundation::collections::FixedVec;
///
/// let mut vec = FixedVec::<char, 6>::new();
/// vec.extend_from_slice(&['A', 'B', 'C', 'D', 'E'])?;
/// vec.insert(2, 'X')?;
/// assert_eq!(vec.as_slice(), &['A', 'B', 'X', 'C', 'D', 'E']);
///
/// assert!(vec.push_back('F').is_err());
/// assert_eq!(vec.erase(2)?, 'X');
/// # Ok::<(), inplace_foundation::Error>(())
/// ```
pub struct FixedVec<T, const N: usize> {
    /// Element storage
    /// Invariant: slots[0..len) are initialized
    slots: [MaybeUninit<T>; N],

    /// Number of live elements
    /// Invariant: len <= N
    len: usize,

    /// Marker for drop checker
    _marker: PhantomData<T>,
}

impl<T, const N: usize> FixedVec<T, N> {
    /// Creates a new empty vector.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: [const { MaybeUninit::uninit() }; N], len: 0, _marker: PhantomData }
    }

    /// Creates a vector holding `len` default values.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if `len > N`.
    pub fn with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        let mut vec = Self::new();
        vec.resize(len)?;
        Ok(vec)
    }

    /// Creates a vector holding clones of `values`.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if `values` has more than `N` elements.
    pub fn from_slice(values: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut vec = Self::new();
        vec.len = lifetime::construct_copy_n(values, &mut vec.slots)?.len();
        Ok(vec)
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns how many more elements fit.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Returns `true` if the vector has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the vector is at capacity.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots[0..len) are initialized.
        unsafe { lifetime::slice_assume_init_ref(&self.slots[..self.len]) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots[0..len) are initialized.
        unsafe { lifetime::slice_assume_init_mut(&mut self.slots[..self.len]) }
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the vector is full. The value is
    /// dropped and the vector is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(Self::capacity_error());
        }
        self.slots[self.len].write(value);
        self.len += 1;
        Ok(())
    }

    /// Appends a default value and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the vector is full.
    pub fn push_default(&mut self) -> Result<&mut T>
    where
        T: Default,
    {
        if self.is_full() {
            return Err(Self::capacity_error());
        }
        let index = self.len;
        // len only counts the slot once T::default() has returned.
        lifetime::construct_default(&mut self.slots[index]);
        self.len += 1;
        // SAFETY: the slot was constructed just above.
        Ok(unsafe { self.slots[index].assume_init_mut() })
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `Err(EmptyContainer)` if the vector is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            trace_event!(DEBUG, container = "FixedVec", "pop on empty container");
            return Err(kinds::EmptyError.into());
        }
        self.len -= 1;
        // SAFETY: the slot was live and is no longer counted in len.
        Ok(unsafe { self.slots[self.len].assume_init_read() })
    }

    /// Inserts `value` at `index`, shifting the tail one slot right.
    ///
    /// # Time Complexity
    ///
    /// O(len - index)
    ///
    /// # Errors
    ///
    /// Returns `Err(IndexOutOfBounds)` if `index > len` and
    /// `Err(CapacityExceeded)` if the vector is full.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(kinds::out_of_bounds_error(index, self.len).into());
        }
        if self.is_full() {
            return Err(Self::capacity_error());
        }
        enter_span!(crate::tracing::ContainerTrace::shifted("FixedVec", self.len - index));
        // SAFETY: index + (len - index) + 1 = len + 1 <= N.
        unsafe { lifetime::move_range_unchecked(&mut self.slots, index, self.len - index, index + 1) };
        self.slots[index].write(value);
        self.len += 1;
        Ok(())
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err(IndexOutOfBounds)` if `index > len` and
    /// `Err(CapacityExceeded)` if fewer than `count` slots are free. On error
    /// nothing is inserted.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        if index > self.len {
            return Err(kinds::out_of_bounds_error(index, self.len).into());
        }
        if count > self.remaining() {
            return Err(Self::capacity_error());
        }
        let old_len = self.len;
        // A panicking clone leaks the tail rather than dropping it twice.
        self.len = index;
        // SAFETY: index + count + (old_len - index) = old_len + count <= N.
        unsafe { lifetime::move_range_unchecked(&mut self.slots, index, old_len - index, index + count) };
        for slot in &mut self.slots[index..index + count] {
            lifetime::construct_copy(slot, value);
        }
        self.len = old_len + count;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail one
    /// slot left.
    ///
    /// # Errors
    ///
    /// Returns `Err(IndexOutOfBounds)` if `index >= len`.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(kinds::out_of_bounds_error(index, self.len).into());
        }
        enter_span!(crate::tracing::ContainerTrace::shifted("FixedVec", self.len - index - 1));
        // SAFETY: index < len, so the slot is live; the shift below
        // overwrites it before it could be read again.
        let value = unsafe { self.slots[index].assume_init_read() };
        // SAFETY: (index + 1) + (len - index - 1) = len <= N.
        unsafe {
            lifetime::move_range_unchecked(&mut self.slots, index + 1, self.len - index - 1, index);
        }
        self.len -= 1;
        Ok(value)
    }

    /// Drops the elements in `range` and closes the gap.
    ///
    /// # Errors
    ///
    /// Returns `Err(InvalidRange)` if the range is reversed or ends past
    /// `len`.
    pub fn erase_range(&mut self, range: Range<usize>) -> Result<()> {
        let Range { start, end } = range;
        if start > end || end > self.len {
            return Err(Error::invalid_range("FixedVec erase range outside live elements"));
        }
        let old_len = self.len;
        // A panicking destructor leaks the tail rather than dropping it twice.
        self.len = start;
        // SAFETY: start..end lies inside the old live range.
        unsafe { lifetime::destroy_n(&mut self.slots[start..end]) };
        // SAFETY: end + (old_len - end) = old_len <= N.
        unsafe { lifetime::move_range_unchecked(&mut self.slots, end, old_len - end, start) };
        self.len = old_len - (end - start);
        Ok(())
    }

    /// Shortens the vector to `len`, dropping the excess. No-op if the
    /// vector is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let old_len = self.len;
        self.len = len;
        // SAFETY: len..old_len were live and are no longer counted.
        unsafe { lifetime::destroy_n(&mut self.slots[len..old_len]) };
    }

    /// Grows with default values or shrinks by dropping, to exactly `len`
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if `len > N`.
    pub fn resize(&mut self, len: usize) -> Result<()>
    where
        T: Default,
    {
        if len > N {
            return Err(Self::capacity_error());
        }
        if len <= self.len {
            self.truncate(len);
        } else {
            lifetime::construct_default_n(&mut self.slots[self.len..len]);
            self.len = len;
        }
        Ok(())
    }

    /// Drops every element.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends clones of every element in `values`.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the values do not all fit. On
    /// error nothing is appended.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        if values.len() > self.remaining() {
            return Err(Self::capacity_error());
        }
        let appended = lifetime::construct_copy_n(values, &mut self.slots[self.len..])?.len();
        self.len += appended;
        Ok(())
    }

    /// Returns the first element equal to `value`.
    #[must_use]
    pub fn find(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|candidate| *candidate == value)
    }

    /// Returns the position of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|candidate| candidate == value)
    }

    /// Returns the first element.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Exchanges the contents of two vectors.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.slots, &mut other.slots);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    #[cold]
    fn capacity_error() -> Error {
        enter_span!(crate::tracing::ContainerTrace::rejected("FixedVec", N));
        trace_event!(DEBUG, container = "FixedVec", capacity = N, "capacity exceeded");
        kinds::capacity_error(N).into()
    }
}

// RAII: Automatic cleanup on drop
impl<T, const N: usize> Drop for FixedVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for FixedVec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for FixedVec<T, N> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        // len grows one element at a time so a panicking clone drops the
        // elements already copied.
        for value in self {
            copy.slots[copy.len].write(value.clone());
            copy.len += 1;
        }
        copy
    }
}

impl<T, const N: usize> Deref for FixedVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for FixedVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for FixedVec<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Clone, const N: usize> TryFrom<&[T]> for FixedVec<T, N> {
    type Error = Error;

    fn try_from(values: &[T]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Hash implementation for use in hash-based collections
impl<T: Hash, const N: usize> Hash for FixedVec<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// PartialEq implementation for equality comparison
impl<T: PartialEq, const N: usize> PartialEq for FixedVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for FixedVec<T, N> {}

// IntoIterator for references
impl<'a, T, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_vector_insert_shift() {
        let mut vec: FixedVec<u8, 6> = FixedVec::new();
        for value in 0..5u8 {
            assert!(vec.push_back(value).is_ok());
        }
        let index: usize = kani::any();
        kani::assume(index <= 5);

        assert!(vec.insert(index, 99).is_ok());
        assert!(vec.len() == 6);
        assert!(vec[index] == 99);
        for i in 0..6 {
            if i < index {
                assert!(vec[i] == i as u8);
            } else if i > index {
                assert!(vec[i] == (i - 1) as u8);
            }
        }
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_vector_capacity_enforcement() {
        let mut vec: FixedVec<u32, 3> = FixedVec::new();
        let pushes: usize = kani::any();
        kani::assume(pushes <= 3);
        for _ in 0..pushes {
            assert!(vec.push_back(kani::any()).is_ok());
        }
        let result = vec.insert(0, 1);
        assert!(result.is_err() == (pushes == 3));
        assert!(vec.len() <= vec.capacity());
    }
}

// ============================================================================
// Tests
// ============================================================================
