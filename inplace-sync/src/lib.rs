// inplace - inplace-sync
// Module: Atomic Primitives
// SW-REQ-ID: REQ_CONCURRENCY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![doc = "no_std atomic primitives (AtomicCell, AtomicCounter, AtomicFlag) for the inplace project."]
#![warn(clippy::missing_panics_doc)]

// Conditionally use `std` for tests or specific features
#[cfg(feature = "std")]
extern crate std;

pub mod atomic;
pub mod counter;
pub mod flag;
pub mod prelude;

// Include verification module conditionally, but exclude during coverage builds
#[cfg(all(not(coverage), kani))]
pub mod verify;

pub use atomic::*;
pub use counter::AtomicCounter;
pub use flag::AtomicFlag;
