// inplace - inplace-foundation
// Module: Limits
// SW-REQ-ID: REQ_RESOURCE_002
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Platform-specific default capacities.
//!
//! Different platform profiles are supported via feature flags:
//!
//! - `embedded-small`: 16-bit class microcontrollers
//! - `embedded-medium`: 32-bit microcontrollers
//! - Default: 64-bit hosts
//!
//! Only the defaults change between profiles. Every container still takes
//! its capacity as a const generic, so any capacity can be chosen
//! explicitly.
//!
//! # Usage
//!
//! ```rust
//! use inplace_foundation::{limits, Stack};
//!
//! let stack: Stack<u32> = Stack::new();
//! assert_eq!(stack.capacity(), limits::DEFAULT_STACK_SIZE);
//! ```

use crate::collections::{FixedMap, FixedStack};

/// Platform profile for 16-bit class microcontrollers
#[cfg(feature = "embedded-small")]
pub mod platform {
    /// Default capacity of [`crate::Stack`]
    pub const DEFAULT_STACK_SIZE: usize = 16;

    /// Default capacity of [`crate::collections::History`] windows
    pub const DEFAULT_HISTORY_LEN: usize = 4;
}

/// Platform profile for 32-bit microcontrollers
#[cfg(all(feature = "embedded-medium", not(feature = "embedded-small")))]
pub mod platform {
    /// Default capacity of [`crate::Stack`]
    pub const DEFAULT_STACK_SIZE: usize = 32;

    /// Default capacity of [`crate::collections::History`] windows
    pub const DEFAULT_HISTORY_LEN: usize = 8;
}

/// Platform profile for 64-bit hosts (default)
#[cfg(not(any(feature = "embedded-small", feature = "embedded-medium")))]
pub mod platform {
    /// Default capacity of [`crate::Stack`]
    pub const DEFAULT_STACK_SIZE: usize = 64;

    /// Default capacity of [`crate::collections::History`] windows
    pub const DEFAULT_HISTORY_LEN: usize = 16;
}

pub use platform::{DEFAULT_HISTORY_LEN, DEFAULT_STACK_SIZE};

/// Default capacity of [`Map`], the same in every profile.
pub const DEFAULT_MAP_ENTRIES: usize = 16;

/// Largest strong or weak count a handle may reach.
///
/// A clone that finds the count above this value aborts instead of risking
/// a wrap to zero.
pub const MAX_REFCOUNT: usize = isize::MAX as usize;

/// Stack with the platform default capacity.
pub type Stack<T> = FixedStack<T, DEFAULT_STACK_SIZE>;

/// Map with the default entry count.
pub type Map<K, V> = FixedMap<K, V, DEFAULT_MAP_ENTRIES>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_ordering() {
        assert!(DEFAULT_HISTORY_LEN <= DEFAULT_STACK_SIZE);
        assert!(DEFAULT_STACK_SIZE.is_power_of_two());
        assert_eq!(DEFAULT_MAP_ENTRIES, 16);
        assert!(MAX_REFCOUNT < usize::MAX);
    }
}
