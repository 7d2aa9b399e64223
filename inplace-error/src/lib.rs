// inplace - inplace-error
// Module: Error Handling
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error handling for the inplace foundation.
//!
//! Every fallible operation in the workspace reports failure through the
//! single [`Error`] type defined here. Errors are plain `Copy` values with a
//! static message, so creating and returning them never allocates.
//!
//! # Error Categories
//!
//! ## Capacity Errors (1000-1099)
//! - A push, insert or write beyond the fixed capacity
//!
//! ## Container Errors (1100-1199)
//! - Pop, read, front or back on an empty container
//! - Index outside the live range
//!
//! ## Lookup Errors (1200-1299)
//! - Key not present in a map
//!
//! ## Lifetime Errors (1300-1399)
//! - Observing handle whose object has been destroyed
//! - Dereferencing a null owning handle
//! - Reference count overflow/underflow (fatal)
//!
//! # Usage
//!
//! ```
//! use inplace_error::{codes, kinds, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Capacity,
//!     codes::CAPACITY_EXCEEDED,
//!     "FixedVec capacity exceeded",
//! );
//! assert_eq!(error.code, codes::CAPACITY_EXCEEDED);
//!
//! let from_kind: Error = kinds::OutOfBoundsError { index: 7, len: 3 }.into();
//! assert_eq!(from_kind.category, ErrorCategory::Container);
//! assert_eq!(
//!     from_kind.to_string(),
//!     "[Container][E044D] Index out of bounds (index 7, len 3)"
//! );
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::missing_panics_doc)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

/// Error codes for inplace
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Error kind definitions
pub mod kinds;

pub mod helpers;
pub mod prelude;

// Include verification module conditionally, but exclude during coverage builds
#[cfg(all(not(coverage), any(kani, feature = "kani")))]
pub mod verify;

// Re-export key types
pub use errors::{Error, ErrorCategory, ErrorDetail, ErrorSource};
pub use helpers::*;

/// A specialized `Result` type for inplace operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error conversion trait for converting to specific error categories
pub trait ToErrorCategory {
    /// Convert the error to a specific category
    fn to_category(&self) -> ErrorCategory;
}
