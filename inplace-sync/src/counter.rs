// inplace - inplace-sync
// Module: Atomic Counter
// SW-REQ-ID: REQ_CONCURRENCY_002
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A sequentially consistent counter built on [`AtomicCell`].

use core::fmt;

use inplace_error::{Error, Result};

use crate::atomic::{AtomicCell, AtomicInteger, MemoryOrder};

/// An integer counter whose operations are all `SeqCst`.
///
/// Cloning takes a snapshot of the current value into a new, independent
/// counter.
///
/// # Examples
///
/// ```
/// use inplace_sync::AtomicCounter;
///
/// let counter: AtomicCounter<u32> = AtomicCounter::new(1);
/// assert_eq!(counter.increment(), 2);
/// assert_eq!(counter.post_decrement(), 2);
/// assert_eq!(counter.value(), 1);
/// ```
pub struct AtomicCounter<T: AtomicInteger = usize> {
    cell: AtomicCell<T>,
}

impl<T: AtomicInteger> AtomicCounter<T> {
    /// Creates a counter starting at `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self { cell: AtomicCell::new(value) }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> T {
        self.cell.load(MemoryOrder::SeqCst)
    }

    /// Overwrites the value.
    #[inline]
    pub fn set(&self, value: T) {
        self.cell.store(value, MemoryOrder::SeqCst);
    }

    /// Copies the value of another counter into this one.
    #[inline]
    pub fn assign_from(&self, other: &Self) {
        self.set(other.value());
    }

    /// Adds one and returns the new value.
    #[inline]
    pub fn increment(&self) -> T {
        self.cell.add_fetch(T::ONE, MemoryOrder::SeqCst)
    }

    /// Subtracts one and returns the new value.
    #[inline]
    pub fn decrement(&self) -> T {
        self.cell.sub_fetch(T::ONE, MemoryOrder::SeqCst)
    }

    /// Adds one and returns the previous value.
    #[inline]
    pub fn post_increment(&self) -> T {
        self.cell.fetch_add(T::ONE, MemoryOrder::SeqCst)
    }

    /// Subtracts one and returns the previous value.
    #[inline]
    pub fn post_decrement(&self) -> T {
        self.cell.fetch_sub(T::ONE, MemoryOrder::SeqCst)
    }

    /// Whether the counter currently reads zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value() == T::ZERO
    }

    /// Adds one unless the counter already reached `limit`.
    ///
    /// # Errors
    ///
    /// Returns a refcount-overflow error and leaves the counter unchanged
    /// when the current value is `limit` or more.
    pub fn checked_increment(&self, limit: T) -> Result<T> {
        self.cell
            .fetch_update(MemoryOrder::SeqCst, |current| {
                (current < limit).then(|| T::wrapping_add(current, T::ONE))
            })
            .map(|previous| T::wrapping_add(previous, T::ONE))
            .map_err(|_| Error::refcount_overflow("AtomicCounter limit reached"))
    }

    /// Subtracts one unless the counter is zero.
    ///
    /// # Errors
    ///
    /// Returns a refcount-underflow error and leaves the counter unchanged
    /// when it already reads zero.
    pub fn checked_decrement(&self) -> Result<T> {
        self.cell
            .fetch_update(MemoryOrder::SeqCst, |current| {
                (current != T::ZERO).then(|| T::wrapping_sub(current, T::ONE))
            })
            .map(|previous| T::wrapping_sub(previous, T::ONE))
            .map_err(|_| Error::refcount_underflow("AtomicCounter already zero"))
    }
}

impl<T: AtomicInteger> Default for AtomicCounter<T> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T: AtomicInteger> Clone for AtomicCounter<T> {
    fn clone(&self) -> Self {
        Self::new(self.value())
    }
}

impl<T: AtomicInteger> fmt::Debug for AtomicCounter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicCounter").field(&self.value()).finish()
    }
}

#[cfg(test)]
mod tests {
    use inplace_error::codes;

    use super::*;

    #[test]
    fn test_pre_and_post_forms() {
        let counter = AtomicCounter::<i32>::default();
        assert!(counter.is_zero());
        assert_eq!(counter.post_increment(), 0);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.decrement(), 1);
        assert_eq!(counter.post_decrement(), 1);
        assert!(counter.is_zero());
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let original: AtomicCounter = AtomicCounter::new(5);
        let copy = original.clone();
        original.increment();
        assert_eq!(copy.value(), 5);
        copy.assign_from(&original);
        assert_eq!(copy.value(), 6);
    }

    #[test]
    fn test_checked_decrement_refuses_zero() -> Result<()> {
        let counter: AtomicCounter<u16> = AtomicCounter::new(1);
        assert_eq!(counter.checked_decrement()?, 0);
        let err = counter.checked_decrement().unwrap_err();
        assert_eq!(err.code, codes::REFCOUNT_UNDERFLOW);
        assert_eq!(counter.value(), 0);
        Ok(())
    }

    #[test]
    fn test_checked_increment_respects_limit() -> Result<()> {
        let counter: AtomicCounter<u8> = AtomicCounter::new(2);
        assert_eq!(counter.checked_increment(3)?, 3);
        assert!(counter.checked_increment(3).is_err());
        assert_eq!(counter.value(), 3);
        Ok(())
    }
}
