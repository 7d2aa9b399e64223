// inplace - inplace-foundation
// Module: Macros
// SW-REQ-ID: REQ_OBSERVABILITY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tracing macros that compile away when the `tracing` feature is off.

/// Emits a tracing event at the given level.
///
/// The level is one of `TRACE`, `DEBUG`, `INFO`, `WARN` or `ERROR`; the
/// remaining tokens are passed to `tracing::event!`. Without the `tracing`
/// feature the arguments are not evaluated.
///
/// ```
/// inplace_foundation::trace_event!(DEBUG, capacity = 8usize, "push rejected");
/// ```
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        $crate::tracing::event!($crate::tracing::Level::$level, $($arg)+)
    };
}

/// Emits a tracing event at the given level.
///
/// The level is one of `TRACE`, `DEBUG`, `INFO`, `WARN` or `ERROR`; the
/// remaining tokens are passed to `tracing::event!`. Without the `tracing`
/// feature the arguments are not evaluated.
///
/// ```
/// inplace_foundation::trace_event!(DEBUG, capacity = 8usize, "push rejected");
/// ```
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        ()
    };
}

/// Enters a span for the rest of the enclosing block.
///
/// Expands to nothing without the `tracing` feature.
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! enter_span {
    ($span:expr) => {
        let _span_guard = $span.entered();
    };
}

/// Enters a span for the rest of the enclosing block.
///
/// Expands to nothing without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! enter_span {
    ($span:expr) => {};
}
