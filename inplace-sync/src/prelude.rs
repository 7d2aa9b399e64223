// inplace - inplace-sync
// Module: Prelude
// SW-REQ-ID: REQ_CONCURRENCY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Common imports for the atomic primitives.

// Core imports for both std and no_std environments
pub use core::{
    fmt,
    fmt::Debug,
    hint::spin_loop,
    marker::PhantomData,
    sync::atomic::{self as core_atomic, Ordering},
};

// Re-export from inplace-error
pub use inplace_error::{codes, kinds, Error, ErrorCategory, Result};

// Re-export from this crate
pub use crate::{
    AtomicBits,
    AtomicCell,
    AtomicCounter,
    AtomicFlag,
    AtomicInteger,
    AtomicPrimitive,
    MemoryOrder,
};
