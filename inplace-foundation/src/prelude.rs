// inplace - inplace-foundation
// Module: Prelude
// SW-REQ-ID: REQ_RESOURCE_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Common imports for users of the foundation crate.
//!
//! `use inplace_foundation::prelude::*;` brings in the containers, the
//! handles, the error type and the atomic primitives they are built on.

// Core imports for both std and no_std environments
pub use core::{
    fmt,
    fmt::Debug,
    marker::PhantomData,
    mem::{self, MaybeUninit},
    ops::{Deref, DerefMut},
};

// Re-export from inplace-error
pub use inplace_error::{codes, kinds, Error, ErrorCategory, Result};
// Re-export from inplace-sync
pub use inplace_sync::{AtomicCell, AtomicCounter, AtomicFlag, MemoryOrder};

// Re-export from this crate
pub use crate::{
    collections::{FixedBuffer, FixedMap, FixedStack, FixedVec, History},
    limits::{Map, Stack, DEFAULT_HISTORY_LEN, DEFAULT_MAP_ENTRIES, DEFAULT_STACK_SIZE},
};
#[cfg(all(feature = "alloc", target_has_atomic = "ptr"))]
pub use crate::handle::{make_shared, SharedOwnership, SharedPtr, WeakPtr};
