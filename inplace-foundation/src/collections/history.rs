// inplace - inplace-foundation
// Module: History - Newest-first sample window
// SW-REQ-ID: REQ_RESOURCE_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-length window over the most recent samples of a signal.

use core::slice;

use super::FixedVec;

/// The last `N` samples pushed, newest first, plus the smallest and largest
/// sample ever pushed.
///
/// The running extremes survive eviction: a spike stays visible in
/// [`History::max`] after it has scrolled out of the window. Only
/// [`History::clear`] resets them.
///
/// # Examples
///
/// ```
/// use inplace_foundation::collections::History;
///
/// let mut temps = History::<i16, 3>::new();
/// for t in [20, 35, 21, 22] {
///     temps.push(t);
/// }
/// assert_eq!(temps.current(), Some(22));
/// assert_eq!(temps.previous(), Some(21));
/// assert_eq!(temps.oldest(), Some(35));
/// assert_eq!(temps.min(), Some(20)); // already evicted, still the minimum
/// assert_eq!(temps.average(), Some(26));
/// ```
#[derive(Debug, Clone)]
pub struct History<T, const N: usize> {
    /// Invariant: index 0 is the newest sample
    samples: FixedVec<T, N>,
    min: Option<T>,
    max: Option<T>,
}

impl<T: Copy + PartialOrd, const N: usize> History<T, N> {
    /// Creates an empty history.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { samples: FixedVec::new(), min: None, max: None }
    }

    /// Records a sample as the newest, shifting older samples back by one.
    ///
    /// Returns the sample that fell out of the window, if the window was
    /// full. With `N == 0` the pushed sample itself is returned.
    pub fn push(&mut self, sample: T) -> Option<T> {
        if self.min.is_none_or(|min| sample < min) {
            self.min = Some(sample);
        }
        if self.max.is_none_or(|max| sample > max) {
            self.max = Some(sample);
        }
        let evicted = if self.samples.is_full() { self.samples.pop_back().ok() } else { None };
        match self.samples.insert(0, sample) {
            Ok(()) => evicted,
            Err(_) => Some(sample),
        }
    }

    /// The newest sample.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.get(0)
    }

    /// The sample before the newest.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<T> {
        self.get(1)
    }

    /// The oldest sample still in the window.
    #[inline]
    #[must_use]
    pub fn oldest(&self) -> Option<T> {
        self.samples.back().copied()
    }

    /// The sample `age` pushes ago; `get(0)` is the newest.
    #[inline]
    #[must_use]
    pub fn get(&self, age: usize) -> Option<T> {
        self.samples.get(age).copied()
    }

    /// Smallest sample pushed since creation or the last clear.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<T> {
        self.min
    }

    /// Largest sample pushed since creation or the last clear.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.max
    }

    /// Integer mean of the samples in the window, rounded toward zero.
    ///
    /// Divides by the number of recorded samples, so a partially filled
    /// window is not biased toward zero. Returns `None` when empty.
    #[must_use]
    pub fn average(&self) -> Option<i64>
    where
        T: Into<i64>,
    {
        let count = i128::try_from(self.samples.len()).ok().filter(|&count| count > 0)?;
        let sum: i128 = self.samples.iter().map(|&sample| i128::from(sample.into())).sum();
        i64::try_from(sum / count).ok()
    }

    /// Iterates from the newest sample to the oldest.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.samples.iter()
    }

    /// The window as a slice, newest first.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.samples.as_slice()
    }

    /// Forgets every sample and the running extremes.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.min = None;
        self.max = None;
    }

    /// Number of samples in the window.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    /// Window length.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if nothing has been pushed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns `true` once `N` samples have been pushed.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.samples.is_full()
    }
}

impl<T: Copy + PartialOrd, const N: usize> Default for History<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Copy + PartialOrd, const N: usize> IntoIterator for &'a History<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
