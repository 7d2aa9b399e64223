// inplace - inplace-error
// Module: Error Prelude
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for inplace-error
//!
//! This module provides a unified set of imports for both std and `no_std`
//! environments. It re-exports commonly used types and traits to ensure
//! consistency across all crates in the workspace and simplify imports in
//! individual modules.

pub use core::{
    fmt,
    fmt::{Debug, Display},
    marker::PhantomData,
    mem,
};

pub use crate::{
    codes,
    kinds,
    Error,
    ErrorCategory,
    ErrorDetail,
    ErrorSource,
    Result,
    ToErrorCategory,
};
