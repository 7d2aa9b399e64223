// inplace - inplace-error
// Module: Error Codes
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for inplace

// Capacity error codes (1000-1099)
/// Capacity exceeded
pub const CAPACITY_EXCEEDED: u16 = 1000;
/// Bulk operation does not fit the remaining room
pub const INSUFFICIENT_ROOM: u16 = 1001;

// Container error codes (1100-1199)
/// Empty container
pub const EMPTY_CONTAINER: u16 = 1100;
/// Index outside the live range
pub const INDEX_OUT_OF_BOUNDS: u16 = 1101;
/// Invalid range (start after end)
pub const INVALID_RANGE: u16 = 1102;

// Lookup error codes (1200-1299)
/// Key not found
pub const KEY_NOT_FOUND: u16 = 1200;

// Lifetime error codes (1300-1399)
/// Observing handle used after its object was destroyed
pub const USE_AFTER_EXPIRY: u16 = 1300;
/// Owning handle is null
pub const NULL_HANDLE: u16 = 1301;
/// Reference count would exceed the configured maximum
pub const REFCOUNT_OVERFLOW: u16 = 1302;
/// Reference count decremented below zero
pub const REFCOUNT_UNDERFLOW: u16 = 1303;
