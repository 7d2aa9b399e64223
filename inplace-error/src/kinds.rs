// inplace - inplace-error
// Module: Error Kinds
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Defines specific error kinds used within the inplace containers.
//!
//! Kinds are zero-cost marker types carrying the detail a caller may want to
//! match on. They convert into the shared [`Error`](crate::Error) with `?`.

use core::fmt::{self, Display};

/// Error when a container is at its fixed capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Fixed capacity of the container
    pub capacity: usize,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity of {} elements exceeded", self.capacity)
    }
}

/// Error when a container is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyError;

impl Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container is empty")
    }
}

/// Error when a key is absent from a map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFoundError;

impl Display for KeyNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key not found")
    }
}

/// Error when an observing handle outlived its object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiredError;

impl Display for ExpiredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observed object has expired")
    }
}

/// Error for an index outside the live range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBoundsError {
    /// Offending index
    pub index: usize,
    /// Live length at the time of the access
    pub len:   usize,
}

impl Display for OutOfBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for length {}", self.index, self.len)
    }
}

/// Creates a capacity error
#[must_use]
pub const fn capacity_error(capacity: usize) -> CapacityError {
    CapacityError { capacity }
}

/// Creates an out of bounds error
#[must_use]
pub const fn out_of_bounds_error(index: usize, len: usize) -> OutOfBoundsError {
    OutOfBoundsError { index, len }
}
