// inplace - inplace-foundation
// Module: Foundation
// SW-REQ-ID: REQ_MEM_SAFETY_001, REQ_RESOURCE_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-capacity containers and reference-counted handles for
//! resource-constrained targets.
//!
//! Nothing in this crate allocates after construction. Containers keep
//! their elements inline in an array of `N` slots and track exactly which
//! slots hold live values; the handle pair allocates its control block once
//! when the first owner is created.
//!
//! | type | behavior |
//! |------|----------|
//! | [`collections::FixedBuffer`] | append at the back, read from the front |
//! | [`collections::FixedStack`]  | last in, first out on top of the buffer |
//! | [`collections::FixedVec`]    | positional insert and erase |
//! | [`collections::FixedMap`]    | unique keys, linear lookup |
//! | [`collections::History`]     | newest-first sample window with running min/max |
//! | [`handle::SharedPtr`] / [`handle::WeakPtr`] | owning and observing handles |
//!
//! # Feature Flags
//!
//! - `alloc` (default): the handle pair
//! - `std`: standard library support (implies `alloc`)
//! - `tracing`: structured events for capacity rejections and handle
//!   lifetimes
//! - `embedded-small` / `embedded-medium`: smaller default capacities in
//!   [`limits`]
//!
//! # Example
//!
//! ```
//! use inplace_foundation::collections::{FixedMap, FixedVec};
//!
//! let mut readings = FixedVec::<u16, 4>::new();
//! readings.push_back(10)?;
//! readings.push_back(30)?;
//! readings.insert(1, 20)?;
//! assert_eq!(readings.as_slice(), &[10, 20, 30]);
//!
//! let mut names = FixedMap::<u8, &str, 2>::new();
//! assert!(names.insert(1, "one")?);
//! assert!(!names.insert(1, "uno")?);
//! assert_eq!(names.find(&1)?, &"one");
//! # Ok::<(), inplace_foundation::Error>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(clippy::missing_panics_doc)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the macros are in scope for every module below.
#[macro_use]
mod macros;

pub mod collections;
pub mod lifetime;
pub mod limits;
pub mod prelude;

/// Owning and observing reference-counted handles
#[cfg(all(feature = "alloc", target_has_atomic = "ptr"))]
pub mod handle;

/// Structured tracing helpers
#[cfg(feature = "tracing")]
pub mod tracing;

pub use collections::{FixedBuffer, FixedMap, FixedStack, FixedVec, History};
#[cfg(all(feature = "alloc", target_has_atomic = "ptr"))]
pub use handle::{make_shared, SharedOwnership, SharedPtr, WeakPtr};
pub use inplace_error::{codes, kinds, Error, ErrorCategory, Result};
pub use limits::{Map, Stack};
