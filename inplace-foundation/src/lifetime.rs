// inplace - inplace-foundation
// Module: Lifetime Operations
// SW-REQ-ID: REQ_MEM_SAFETY_001, REQ_LIFETIME_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for MaybeUninit operations (documented and verified via KANI)
#![allow(unsafe_code)]

//! Element lifetime management over uninitialized slot arrays.
//!
//! Every fixed-capacity container in this crate keeps its elements in a
//! `[MaybeUninit<T>; N]` array plus a count of constructed slots. The
//! functions here are the only places that turn a slot into a live value
//! or a live value back into a slot, so the construct/destroy balance of
//! the whole crate can be audited in one file.
//!
//! # Trivial and non-trivial types
//!
//! The split between trivially destructible types and types with a
//! finalizer is made by the compiler: [`destroy_n`] checks
//! [`core::mem::needs_drop`], which folds to a constant, and [`copy_range`]
//! is only available for `T: Copy`.
//!
//! # Panic safety
//!
//! The bulk constructors (`construct_default_n`, `construct_copy_n`) drop
//! whatever they managed to build if `T::default` or `T::clone` panics
//! part way through, so a panic never leaks half-built elements into a
//! container's live range.

use core::{
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr, slice,
};

use inplace_error::{Error, Result};

/// Constructs a default value in `slot` and returns a reference to it.
///
/// Slots are always written, also for trivially constructible types:
/// reading a slot that was never written is undefined behavior.
#[inline]
pub fn construct_default<T: Default>(slot: &mut MaybeUninit<T>) -> &mut T {
    slot.write(T::default())
}

/// Constructs a clone of `value` in `slot` and returns a reference to it.
#[inline]
pub fn construct_copy<'a, T: Clone>(slot: &'a mut MaybeUninit<T>, value: &T) -> &'a mut T {
    slot.write(value.clone())
}

/// Default-constructs every slot in `slots`.
///
/// If `T::default` panics, the elements constructed so far are dropped
/// before the panic propagates.
pub fn construct_default_n<T: Default>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    let mut guard = PartialInit::new(slots);
    while guard.initialized < guard.slots.len() {
        guard.slots[guard.initialized].write(T::default());
        guard.initialized += 1;
    }
    guard.finish()
}

/// Clones every element of `src` into the front of `dst`.
///
/// `src` and `dst` cannot overlap; the borrow checker guarantees it.
///
/// # Errors
///
/// Returns an insufficient-room error, without constructing anything, when
/// `dst` is shorter than `src`.
pub fn construct_copy_n<'a, T: Clone>(
    src: &[T],
    dst: &'a mut [MaybeUninit<T>],
) -> Result<&'a mut [T]> {
    if dst.len() < src.len() {
        return Err(Error::insufficient_room("construct_copy_n destination too short"));
    }
    let mut guard = PartialInit::new(&mut dst[..src.len()]);
    for value in src {
        guard.slots[guard.initialized].write(value.clone());
        guard.initialized += 1;
    }
    Ok(guard.finish())
}

/// Bitwise copies `src` into the front of `dst`.
///
/// Only available for `Copy` types, where a byte copy is a valid clone.
///
/// # Errors
///
/// Returns an insufficient-room error when `dst` is shorter than `src`.
pub fn copy_range<'a, T: Copy>(src: &[T], dst: &'a mut [MaybeUninit<T>]) -> Result<&'a mut [T]> {
    if dst.len() < src.len() {
        return Err(Error::insufficient_room("copy_range destination too short"));
    }
    let dst = &mut dst[..src.len()];
    // SAFETY: `dst` has exactly `src.len()` slots, the two slices come from
    // distinct borrows so they cannot overlap, and `T: Copy` makes the
    // bitwise copy a valid construction of every destination slot.
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_mut_ptr().cast::<T>(), src.len());
        Ok(slice_assume_init_mut(dst))
    }
}

/// Drops the value in `slot`, leaving it uninitialized.
///
/// # Safety
///
/// `slot` must hold an initialized value, and the value must not be used
/// again afterwards.
#[inline]
pub unsafe fn destroy<T>(slot: &mut MaybeUninit<T>) {
    // SAFETY: guaranteed by the caller.
    unsafe { slot.assume_init_drop() }
}

/// Drops every value in `slots`.
///
/// This is a no-op for types without drop glue.
///
/// # Safety
///
/// Every slot must hold an initialized value, and none of them may be used
/// again afterwards.
#[inline]
pub unsafe fn destroy_n<T>(slots: &mut [MaybeUninit<T>]) {
    if mem::needs_drop::<T>() {
        // SAFETY: the caller guarantees every slot is initialized.
        unsafe { ptr::drop_in_place(slice_assume_init_mut(slots)) }
    }
}

/// Relocates `count` slots starting at `src` so they start at `dst`.
///
/// The ranges may overlap; the copy behaves like `memmove`. The bits are
/// moved, no constructor or destructor runs. Afterwards the caller owns the
/// values at `dst..dst + count` and must treat any source slot outside that
/// range as uninitialized.
///
/// # Errors
///
/// Returns an invalid-range error when either range ends past the slice.
pub fn move_range<T>(
    slots: &mut [MaybeUninit<T>],
    src: usize,
    count: usize,
    dst: usize,
) -> Result<()> {
    let len = slots.len();
    let in_bounds = |start: usize| start.checked_add(count).is_some_and(|end| end <= len);
    if !in_bounds(src) || !in_bounds(dst) {
        return Err(Error::invalid_range("move_range outside slot array"));
    }
    // SAFETY: both ranges were checked above.
    unsafe { move_range_unchecked(slots, src, count, dst) };
    Ok(())
}

/// [`move_range`] without the bounds check, for callers whose indices are
/// already derived from a container's live length.
///
/// # Safety
///
/// `src + count` and `dst + count` must not exceed `slots.len()`.
#[inline]
pub(crate) unsafe fn move_range_unchecked<T>(
    slots: &mut [MaybeUninit<T>],
    src: usize,
    count: usize,
    dst: usize,
) {
    debug_assert!(src + count <= slots.len() && dst + count <= slots.len());
    if count == 0 || src == dst {
        return;
    }
    let base = slots.as_mut_ptr();
    // SAFETY: the caller keeps both ranges inside `slots`, and `ptr::copy`
    // handles overlap. Copying `MaybeUninit<T>` never drops.
    unsafe { ptr::copy(base.add(src), base.add(dst), count) };
}

/// Reinterprets initialized slots as a slice of values.
///
/// # Safety
///
/// Every slot in `slots` must be initialized.
#[inline]
pub(crate) unsafe fn slice_assume_init_ref<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    // SAFETY: `MaybeUninit<T>` has the same layout as `T`; the caller
    // guarantees initialization.
    unsafe { slice::from_raw_parts(slots.as_ptr().cast::<T>(), slots.len()) }
}

/// Mutable counterpart of [`slice_assume_init_ref`].
///
/// # Safety
///
/// Every slot in `slots` must be initialized.
#[inline]
pub(crate) unsafe fn slice_assume_init_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    // SAFETY: see `slice_assume_init_ref`.
    unsafe { slice::from_raw_parts_mut(slots.as_mut_ptr().cast::<T>(), slots.len()) }
}

/// Tracks how many leading slots of a bulk construction are live so a
/// panic can undo them.
struct PartialInit<'a, T> {
    slots: &'a mut [MaybeUninit<T>],
    initialized: usize,
}

impl<'a, T> PartialInit<'a, T> {
    fn new(slots: &'a mut [MaybeUninit<T>]) -> Self {
        Self { slots, initialized: 0 }
    }

    /// Disarms the guard and hands out the constructed prefix.
    fn finish(self) -> &'a mut [T] {
        let mut this = ManuallyDrop::new(self);
        let len = this.initialized;
        let base = this.slots.as_mut_ptr().cast::<T>();
        // SAFETY: the first `len` slots were written, the guard will not run,
        // and the pointer comes from a borrow that lives for `'a`.
        unsafe { slice::from_raw_parts_mut(base, len) }
    }
}

impl<T> Drop for PartialInit<'_, T> {
    fn drop(&mut self) {
        // SAFETY: exactly the first `initialized` slots were written.
        unsafe { destroy_n(&mut self.slots[..self.initialized]) }
    }
}

// ============================================================================
// Tests
// ============================================================================
