// inplace - inplace-error
// Module: Error Types
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

/// Unified error handling system for inplace
///
/// This module provides the error type shared by every crate in the
/// workspace. It includes the error type, its categories, and named
/// constructors for the conditions the containers and handles report.
use core::fmt;

use crate::{codes, kinds, ToErrorCategory};

/// `Error` categories for inplace operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Fixed capacity would be exceeded
    Capacity    = 1,
    /// Container state does not allow the operation (empty, bad index)
    Container   = 2,
    /// Key lookup misses
    Lookup      = 3,
    /// Object lifetime violations (expired observer, null owner)
    Lifetime    = 4,
    /// Parameter-related errors (invalid arguments)
    Parameter   = 5,
    /// Reference counting and other concurrency errors
    Concurrency = 6,
}

/// Base trait for all error types - `no_std` version
pub trait ErrorSource: fmt::Debug + Send + Sync {
    /// Get the error code
    fn code(&self) -> u16;

    /// Get the error message
    fn message(&self) -> &'static str;

    /// Get the error category
    fn category(&self) -> ErrorCategory;
}

/// Numeric detail carried over from a typed error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Fixed capacity of the container that rejected the operation
    Capacity(usize),
    /// Rejected index and the live length at the time of the access
    Bounds {
        /// Offending index
        index: usize,
        /// Live length
        len:   usize,
    },
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity(capacity) => write!(f, "capacity {capacity}"),
            Self::Bounds { index, len } => write!(f, "index {index}, len {len}"),
        }
    }
}

/// inplace `Error` type
///
/// Categorized error with a numeric code, a static message and optional
/// numeric detail. The type is `Copy` so it can be returned from `no_std`
/// code paths without any allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
    /// Detail from the typed kind the error was built from
    pub detail:   Option<ErrorDetail>,
}

impl Error {
    /// Empty container error
    pub const EMPTY_CONTAINER: Self = Self::empty_container("Container is empty");
    /// Null handle error
    pub const NULL_HANDLE: Self = Self::null_handle("Handle does not own an object");
    /// Use after expiry error
    pub const USE_AFTER_EXPIRY: Self =
        Self::use_after_expiry("Observed object has already been destroyed");

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
            detail: None,
        }
    }

    /// Attach numeric detail to the error.
    #[must_use]
    pub const fn with_detail(self, detail: ErrorDetail) -> Self {
        Self {
            detail: Some(detail),
            ..self
        }
    }

    /// Create a capacity exceeded error
    #[must_use]
    pub const fn capacity_exceeded(message: &'static str) -> Self {
        Self::new(ErrorCategory::Capacity, codes::CAPACITY_EXCEEDED, message)
    }

    /// Create an insufficient room error for bulk operations
    #[must_use]
    pub const fn insufficient_room(message: &'static str) -> Self {
        Self::new(ErrorCategory::Capacity, codes::INSUFFICIENT_ROOM, message)
    }

    /// Create an empty container error
    #[must_use]
    pub const fn empty_container(message: &'static str) -> Self {
        Self::new(ErrorCategory::Container, codes::EMPTY_CONTAINER, message)
    }

    /// Create an index out of bounds error
    #[must_use]
    pub const fn index_out_of_bounds(message: &'static str) -> Self {
        Self::new(ErrorCategory::Container, codes::INDEX_OUT_OF_BOUNDS, message)
    }

    /// Create an invalid range error
    #[must_use]
    pub const fn invalid_range(message: &'static str) -> Self {
        Self::new(ErrorCategory::Parameter, codes::INVALID_RANGE, message)
    }

    /// Create a key not found error
    #[must_use]
    pub const fn key_not_found(message: &'static str) -> Self {
        Self::new(ErrorCategory::Lookup, codes::KEY_NOT_FOUND, message)
    }

    /// Create a use after expiry error
    #[must_use]
    pub const fn use_after_expiry(message: &'static str) -> Self {
        Self::new(ErrorCategory::Lifetime, codes::USE_AFTER_EXPIRY, message)
    }

    /// Create a null handle error
    #[must_use]
    pub const fn null_handle(message: &'static str) -> Self {
        Self::new(ErrorCategory::Lifetime, codes::NULL_HANDLE, message)
    }

    /// Create a reference count overflow error
    #[must_use]
    pub const fn refcount_overflow(message: &'static str) -> Self {
        Self::new(ErrorCategory::Concurrency, codes::REFCOUNT_OVERFLOW, message)
    }

    /// Create a reference count underflow error
    #[must_use]
    pub const fn refcount_underflow(message: &'static str) -> Self {
        Self::new(ErrorCategory::Concurrency, codes::REFCOUNT_UNDERFLOW, message)
    }

    /// Check if this is a capacity error
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        self.category == ErrorCategory::Capacity
    }

    /// Check if this is a lifetime error
    #[must_use]
    pub fn is_lifetime_error(&self) -> bool {
        self.category == ErrorCategory::Lifetime
    }

    /// Check if this is a fatal error.
    ///
    /// Fatal errors indicate a broken reference-counting invariant. Handles
    /// abort on them; only the checked counter operations return them as
    /// values.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, codes::REFCOUNT_OVERFLOW | codes::REFCOUNT_UNDERFLOW)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)?;
        if let Some(detail) = self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl ErrorSource for Error {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> &'static str {
        self.message
    }

    fn category(&self) -> ErrorCategory {
        self.category
    }
}

impl ToErrorCategory for Error {
    fn to_category(&self) -> ErrorCategory {
        self.category
    }
}

// -- From<kinds::X> for Error implementations --
impl From<kinds::CapacityError> for Error {
    fn from(e: kinds::CapacityError) -> Self {
        Self::capacity_exceeded("Capacity exceeded").with_detail(ErrorDetail::Capacity(e.capacity))
    }
}

impl From<kinds::EmptyError> for Error {
    fn from(_e: kinds::EmptyError) -> Self {
        Self::EMPTY_CONTAINER
    }
}

impl From<kinds::KeyNotFoundError> for Error {
    fn from(_e: kinds::KeyNotFoundError) -> Self {
        Self::key_not_found("Key not found")
    }
}

impl From<kinds::ExpiredError> for Error {
    fn from(_e: kinds::ExpiredError) -> Self {
        Self::USE_AFTER_EXPIRY
    }
}

impl From<kinds::OutOfBoundsError> for Error {
    fn from(e: kinds::OutOfBoundsError) -> Self {
        Self::index_out_of_bounds("Index out of bounds")
            .with_detail(ErrorDetail::Bounds { index: e.index, len: e.len })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::capacity_exceeded("FixedVec capacity exceeded");
        assert_eq!(error.category, ErrorCategory::Capacity);
        assert_eq!(error.code, codes::CAPACITY_EXCEEDED);
        assert!(error.is_capacity_error());
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::EMPTY_CONTAINER.category, ErrorCategory::Container);
        assert!(Error::USE_AFTER_EXPIRY.is_lifetime_error());
        assert!(Error::NULL_HANDLE.is_lifetime_error());
        assert_eq!(Error::key_not_found("missing").category, ErrorCategory::Lookup);
        assert!(Error::refcount_underflow("underflow").is_fatal());
    }

    #[test]
    fn test_from_kinds() {
        let error: Error = kinds::EmptyError.into();
        assert_eq!(error, Error::EMPTY_CONTAINER);

        let error: Error = kinds::ExpiredError.into();
        assert_eq!(error.code, codes::USE_AFTER_EXPIRY);

        let error: Error = kinds::out_of_bounds_error(3, 3).into();
        assert_eq!(error.code, codes::INDEX_OUT_OF_BOUNDS);
        assert_eq!(error.detail, Some(ErrorDetail::Bounds { index: 3, len: 3 }));

        let error: Error = kinds::capacity_error(16).into();
        assert!(error.is_capacity_error());
        assert_eq!(error.detail, Some(ErrorDetail::Capacity(16)));
    }
}
