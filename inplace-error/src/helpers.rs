// inplace - inplace-error
// Module: Error Helpers
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error helper functions for common error patterns.
//!
//! The `fatal_*` functions are the single exit point for broken
//! reference-counting invariants: these are programming errors and never
//! returned as values.

use crate::Error;

/// Abort on a reference count that would pass the configured maximum.
///
/// # Panics
///
/// Always. The count is left untouched so the object leaks instead of being
/// freed while handles still point at it.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal_refcount_overflow() -> ! {
    let error = Error::refcount_overflow("Reference count overflow");
    panic!("{error}")
}

/// Abort on a reference count decremented past zero.
///
/// # Panics
///
/// Always. A decrement below zero means a handle to an already destroyed
/// object was still in use.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal_refcount_underflow() -> ! {
    let error = Error::refcount_underflow("Reference count underflow");
    panic!("{error}")
}

/// Abort on a handle copied after its object died.
///
/// # Panics
///
/// Always.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal_copy_after_death() -> ! {
    let error = Error::use_after_expiry("Owning handle copied after its object was destroyed");
    panic!("{error}")
}
