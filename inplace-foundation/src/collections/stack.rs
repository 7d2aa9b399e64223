// inplace - inplace-foundation
// Module: FixedStack - Last-in first-out stack
// SW-REQ-ID: REQ_RESOURCE_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Last-in, first-out stack on top of [`FixedBuffer`].

use core::slice;

use inplace_error::Result;

use super::FixedBuffer;

/// A stack with compile-time capacity and inline storage.
///
/// [`crate::Stack`] is this type with the platform default capacity.
///
/// # Examples
///
/// ```
/// use inplace_foundation::collections::FixedStack;
///
/// let mut stack = FixedStack::<u8, 2>::new();
/// stack.push(1)?;
/// stack.push(2)?;
/// assert!(stack.push(3).is_err());
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.peek(), Some(&1));
/// # Ok::<(), inplace_foundation::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStack<T, const N: usize> {
    buffer: FixedBuffer<T, N>,
}

impl<T, const N: usize> FixedStack<T, N> {
    /// Creates a new empty stack.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: FixedBuffer::new() }
    }

    /// Pushes a value on top.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityExceeded)` if the stack is full.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        self.buffer.write(value)
    }

    /// Removes and returns the top value.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.buffer.pop_back()
    }

    /// Returns the top value.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.buffer.data().last()
    }

    /// Returns the top value mutably.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.buffer.data_mut().last_mut()
    }

    /// Drops every value.
    #[inline]
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterates from the bottom of the stack to the top.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buffer.iter()
    }

    /// Number of values on the stack.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.used()
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns `true` if the stack is full.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.buffer.is_full()
    }
}

impl<T, const N: usize> Default for FixedStack<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() -> Result<()> {
        let mut stack = FixedStack::<u32, 3>::new();
        for value in 1..=3 {
            stack.push(value)?;
        }
        assert!(stack.is_full());
        assert!(stack.push(4).is_err());
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        stack.push(5)?;
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(stack.pop(), Some(5));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        Ok(())
    }

    #[test]
    fn test_peek_mut() -> Result<()> {
        let mut stack = FixedStack::<u8, 2>::default();
        assert!(stack.peek().is_none());
        stack.push(1)?;
        if let Some(top) = stack.peek_mut() {
            *top = 9;
        }
        assert_eq!(stack.peek(), Some(&9));
        assert_eq!(stack.len(), 1);
        Ok(())
    }
}
