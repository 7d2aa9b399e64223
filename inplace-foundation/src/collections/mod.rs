// inplace - inplace-foundation
// Module: Collections
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-capacity collections with inline storage.
//!
//! All collections in this module:
//! - Use inline storage (no heap allocation)
//! - Take their capacity as a const generic parameter
//! - Report capacity exhaustion as `Err(CapacityExceeded)` instead of
//!   growing or panicking
//! - Drop exactly the elements they constructed
//!
//! # Available Collections
//!
//! - [`FixedBuffer`]: append at the back, read from the front
//! - [`FixedStack`]: last in, first out
//! - [`FixedVec`]: positional insert and erase
//! - [`FixedMap`]: unique keys with linear lookup
//! - [`History`]: newest-first sample window

mod buffer;
mod history;
mod map;
mod stack;
mod vector;

pub use buffer::FixedBuffer;
pub use history::History;
pub use map::{Entry, FixedMap, Iter as MapIter, IterMut as MapIterMut, OccupiedEntry, VacantEntry};
pub use stack::FixedStack;
pub use vector::FixedVec;
