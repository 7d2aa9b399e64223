// inplace - inplace-foundation
// Module: Tracing
// SW-REQ-ID: REQ_OBSERVABILITY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tracing support for the foundation containers and handles
//!
//! This module wraps the `tracing` crate, which works without std, and
//! provides span helpers for the two places worth observing on a small
//! target: containers rejecting or shifting elements, and handles
//! destroying their pointee or failing to lock.
//!
//! Install any `tracing` subscriber in the final binary to collect the
//! output. Without one every span and event is a cheap no-op.

pub use ::tracing::{debug, error, info, trace, warn};
pub use ::tracing::{debug_span, error_span, info_span, span, trace_span, warn_span};
pub use ::tracing::{event, Level, Span};

/// Spans for container operations
#[derive(Debug, Clone)]
pub struct ContainerTrace;

impl ContainerTrace {
    /// Create a span for a mutation rejected because the container is full
    #[inline]
    pub fn rejected(container: &'static str, capacity: usize) -> Span {
        debug_span!("container_rejected", container = %container, capacity = %capacity)
    }

    /// Create a span for a tail shift during positional insert or erase
    #[inline]
    pub fn shifted(container: &'static str, moved: usize) -> Span {
        trace_span!("container_shift", container = %container, moved = %moved)
    }
}

/// Spans for handle lifetimes
#[derive(Debug, Clone)]
pub struct HandleTrace;

impl HandleTrace {
    /// Create a span for the destruction of a shared pointee
    #[inline]
    pub fn destroyed(type_name: &'static str) -> Span {
        debug_span!("handle_destroy", pointee = %type_name)
    }

    /// Create a span for a `lock()` on an expired observer
    #[inline]
    pub fn lock_failed(type_name: &'static str) -> Span {
        debug_span!("handle_lock_failed", pointee = %type_name)
    }
}
