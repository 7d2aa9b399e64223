// inplace - inplace-sync
// Module: Atomic Flag
// SW-REQ-ID: REQ_CONCURRENCY_003
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A single atomic boolean with test-and-set semantics.

use core::sync::atomic::AtomicBool;

use crate::atomic::MemoryOrder;

/// An atomic boolean flag, initially clear.
///
/// The flag is the smallest building block for a spinlock:
///
/// ```
/// use inplace_sync::{AtomicFlag, MemoryOrder};
///
/// let lock = AtomicFlag::new();
/// while lock.test_and_set(MemoryOrder::Acquire) {
///     core::hint::spin_loop();
/// }
/// // critical section
/// lock.clear(MemoryOrder::Release);
/// assert!(!lock.test(MemoryOrder::Relaxed));
/// ```
#[derive(Debug, Default)]
pub struct AtomicFlag {
    set: AtomicBool,
}

impl AtomicFlag {
    /// Creates a clear flag.
    #[must_use]
    pub const fn new() -> Self {
        Self { set: AtomicBool::new(false) }
    }

    /// Sets the flag and returns whether it was already set.
    #[inline]
    pub fn test_and_set(&self, order: MemoryOrder) -> bool {
        self.set.swap(true, order.rmw())
    }

    /// Clears the flag.
    #[inline]
    pub fn clear(&self, order: MemoryOrder) {
        self.set.store(false, order.store());
    }

    /// Reads the flag without modifying it.
    #[inline]
    pub fn test(&self, order: MemoryOrder) -> bool {
        self.set.load(order.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_and_set_returns_previous() {
        let flag = AtomicFlag::new();
        assert!(!flag.test(MemoryOrder::SeqCst));
        assert!(!flag.test_and_set(MemoryOrder::SeqCst));
        assert!(flag.test_and_set(MemoryOrder::SeqCst));
        flag.clear(MemoryOrder::SeqCst);
        assert!(!flag.test(MemoryOrder::SeqCst));
    }

    #[test]
    fn test_acquire_clear_is_accepted() {
        let flag = AtomicFlag::default();
        flag.test_and_set(MemoryOrder::Relaxed);
        flag.clear(MemoryOrder::Acquire);
        assert!(!flag.test(MemoryOrder::Release));
    }
}
