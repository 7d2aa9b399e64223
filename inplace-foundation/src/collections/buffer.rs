// inplace - inplace-foundation
// Module: FixedBuffer - Inline-storage append buffer
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for MaybeUninit operations (documented and verified via KANI)
#![allow(unsafe_code)]

//! Flat pre-sized buffer with a used-length cursor.
//!
//! `FixedBuffer<T, N>` appends at the back and reads from the front, moving
//! the remaining elements down so slot 0 always holds the oldest value.
//! Reading is O(n); the buffer trades that for a single contiguous live
//! range that can be handed out as a slice at any time.

use core::{fmt, marker::PhantomData, mem::MaybeUninit, slice};

use inplace_error::{kinds, Result};

use crate::lifetime;

/// A first-in, first-out buffer with compile-time capacity.
///
/// # Invariants
///
/// 1. `used <= N` always holds
/// 2. Slots `[0..used)` are initialized, slots `[used..N)` are not
///
/// # Examples
///
/// ```
/// use inplace_foundation::collections::FixedBuffer;
///
/// let mut buffer = FixedBuffer::<u8, 3>::new();
/// buffer.write(1)?;
/// buffer.write(2)?;
/// assert_eq!(buffer.read()?, 1);
/// assert_eq!(buffer.data(), &[2]);
/// assert_eq!(buffer.assign(&[3, 4, 5]), 0); // does not fit
/// assert_eq!(buffer.assign(&[3, 4]), 2);
/// # Ok::<(), inplace_foundation::Error>(())
/// ```
pub struct FixedBuffer<T, const N: usize> {
    /// Invariant: slots[0..used) are initialized
    slots: [MaybeUninit<T>; N],
    /// Invariant: used <= N
    used: usize,
    _marker: PhantomData<T>,
}

impl<T, const N: usize> FixedBuffer<T, N> {
    /// Creates a new empty buffer.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: [const { MaybeUninit::uninit() }; N], used: 0, _marker: PhantomData }
    }

    /// Appends a value at the back.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the buffer is full.
    pub fn write(&mut self, value: T) -> Result<()> {
        self.emplace_back(value).map(|_| ())
    }

    /// Appends a value at the back and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the buffer is full.
    pub fn emplace_back(&mut self, value: T) -> Result<&mut T> {
        if self.is_full() {
            enter_span!(crate::tracing::ContainerTrace::rejected("FixedBuffer", N));
            trace_event!(DEBUG, container = "FixedBuffer", capacity = N, "capacity exceeded");
            return Err(kinds::capacity_error(N).into());
        }
        let index = self.used;
        self.used += 1;
        Ok(self.slots[index].write(value))
    }

    /// Removes and returns the front value, moving the rest one slot down.
    ///
    /// # Time Complexity
    ///
    /// O(used)
    ///
    /// # Errors
    ///
    /// Returns `Err(EmptyContainer)` if the buffer is empty.
    pub fn read(&mut self) -> Result<T> {
        if self.is_empty() {
            trace_event!(DEBUG, container = "FixedBuffer", "read on empty container");
            return Err(kinds::EmptyError.into());
        }
        // SAFETY: used > 0 so slot 0 is live; the shift below overwrites it.
        let value = unsafe { self.slots[0].assume_init_read() };
        // SAFETY: 1 + (used - 1) = used <= N.
        unsafe { lifetime::move_range_unchecked(&mut self.slots, 1, self.used - 1, 0) };
        self.used -= 1;
        Ok(value)
    }

    /// Removes and returns the most recently written value.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.used -= 1;
        // SAFETY: the slot was live and is no longer counted in used.
        Some(unsafe { self.slots[self.used].assume_init_read() })
    }

    /// Appends clones of all `values` if they fit in the remaining room.
    ///
    /// Returns the number of values appended: either `values.len()` or 0
    /// when they do not all fit.
    pub fn assign(&mut self, values: &[T]) -> usize
    where
        T: Clone,
    {
        if values.len() > self.free() {
            trace_event!(DEBUG, container = "FixedBuffer", requested = values.len(), "assign does not fit");
            return 0;
        }
        match lifetime::construct_copy_n(values, &mut self.slots[self.used..]) {
            Ok(written) => {
                self.used += written.len();
                written.len()
            }
            Err(_) => 0,
        }
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        let used = self.used;
        self.used = 0;
        // SAFETY: slots[0..used) were live and are no longer counted.
        unsafe { lifetime::destroy_n(&mut self.slots[..used]) };
    }

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err(IndexOutOfBounds)` if `index >= used`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.get(index).ok_or_else(|| kinds::out_of_bounds_error(index, self.used).into())
    }

    /// Returns the value at `index`, if live.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data().get(index)
    }

    /// Returns the value at `index` mutably, if live.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data_mut().get_mut(index)
    }

    /// Returns the live values, oldest first.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[T] {
        // SAFETY: slots[0..used) are initialized.
        unsafe { lifetime::slice_assume_init_ref(&self.slots[..self.used]) }
    }

    /// Returns the live values mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        // SAFETY: slots[0..used) are initialized.
        unsafe { lifetime::slice_assume_init_mut(&mut self.slots[..self.used]) }
    }

    /// Returns an iterator over the live values, oldest first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data().iter()
    }

    /// Number of live values.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.used
    }

    /// Alias of [`FixedBuffer::used`].
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.used
    }

    /// Number of free slots.
    #[inline]
    #[must_use]
    pub const fn free(&self) -> usize {
        N - self.used
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Size of the slot array in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> usize {
        N * size_of::<T>()
    }

    /// Bytes occupied by live values.
    #[inline]
    #[must_use]
    pub const fn used_bytes(&self) -> usize {
        self.used * size_of::<T>()
    }

    /// Bytes of free slots.
    #[inline]
    #[must_use]
    pub const fn free_bytes(&self) -> usize {
        self.free() * size_of::<T>()
    }

    /// Returns `true` if no value is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns `true` if every slot is live.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.used == N
    }
}

impl<T, const N: usize> Drop for FixedBuffer<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for FixedBuffer<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for FixedBuffer<T, N> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for value in self {
            copy.slots[copy.used].write(value.clone());
            copy.used += 1;
        }
        copy
    }
}

// Equal when the used lengths match and the live values compare equal.
impl<T: PartialEq, const N: usize> PartialEq for FixedBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.used == other.used && self.data() == other.data()
    }
}

impl<T: Eq, const N: usize> Eq for FixedBuffer<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuffer")
            .field("data", &self.data())
            .field("capacity", &N)
            .finish()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

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
    fn verify_buffer_fifo_order() {
        let mut buffer: FixedBuffer<u32, 3> = FixedBuffer::new();
        let a: u32 = kani::any();
        let b: u32 = kani::any();
        let c: u32 = kani::any();

        assert!(buffer.write(a).is_ok());
        assert!(buffer.write(b).is_ok());
        assert!(buffer.write(c).is_ok());
        assert!(buffer.write(0).is_err());

        assert!(buffer.read() == Ok(a));
        assert!(buffer.read() == Ok(b));
        assert!(buffer.read() == Ok(c));
        assert!(buffer.read().is_err());
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
    fn test_round_trip_preserves_order() -> Result<()> {
        let mut buffer = FixedBuffer::<u16, 4>::new();
        for value in [7, 8, 9, 10] {
            buffer.write(value)?;
        }
        assert_eq!(buffer.write(11).unwrap_err().code, codes::CAPACITY_EXCEEDED);
        for expected in [7, 8, 9, 10] {
            assert_eq!(buffer.read()?, expected);
        }
        assert_eq!(buffer.read().unwrap_err().code, codes::EMPTY_CONTAINER);
        Ok(())
    }

    #[test]
    fn test_assign_checks_remaining_room() -> Result<()> {
        let mut buffer = FixedBuffer::<u8, 4>::new();
        buffer.write(1)?;
        assert_eq!(buffer.assign(&[2, 3, 4, 5]), 0);
        assert_eq!(buffer.used(), 1);
        assert_eq!(buffer.assign(&[2, 3, 4]), 3);
        assert!(buffer.is_full());
        assert_eq!(buffer.data(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_sizes() -> Result<()> {
        let mut buffer = FixedBuffer::<u32, 4>::new();
        buffer.write(0)?;
        assert_eq!(buffer.bytes(), 16);
        assert_eq!(buffer.used_bytes(), 4);
        assert_eq!(buffer.free_bytes(), 12);
        assert_eq!(buffer.free(), 3);
        Ok(())
    }

    #[test]
    fn test_at_bounds() -> Result<()> {
        let mut buffer = FixedBuffer::<char, 2>::new();
        buffer.write('q')?;
        assert_eq!(buffer.at(0)?, &'q');
        assert_eq!(buffer.at(1).unwrap_err().code, codes::INDEX_OUT_OF_BOUNDS);
        Ok(())
    }

    #[test]
    fn test_equality_compares_used_then_elements() -> Result<()> {
        let mut a = FixedBuffer::<u8, 3>::new();
        let mut b = FixedBuffer::<u8, 3>::new();
        assert_eq!(a, b);
        a.write(1)?;
        assert_ne!(a, b);
        b.write(2)?;
        assert_ne!(a, b);
        b.clear();
        b.write(1)?;
        assert_eq!(a, b.clone());
        Ok(())
    }

    #[test]
    fn test_pop_back_takes_newest() -> Result<()> {
        let mut buffer = FixedBuffer::<u8, 3>::new();
        buffer.write(1)?;
        buffer.write(2)?;
        assert_eq!(buffer.pop_back(), Some(2));
        assert_eq!(buffer.pop_back(), Some(1));
        assert_eq!(buffer.pop_back(), None);
        Ok(())
    }
}
