// inplace - inplace-foundation
// Module: Shared and weak handles
// SW-REQ-ID: REQ_LIFETIME_002, REQ_CONCURRENCY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for control block management (documented and verified via KANI)
#![allow(unsafe_code)]

//! Reference-counted owning handle and its non-owning observer.
//!
//! A [`SharedPtr`] owns a value together with every other `SharedPtr`
//! cloned from it. A [`WeakPtr`] observes the value without keeping it
//! alive and can tell when it has been destroyed.
//!
//! # Control block
//!
//! Both handles point at one heap block holding two counts and the value.
//! The block is allocated once in [`SharedPtr::new`]; nothing allocates
//! afterwards.
//!
//! - `strong`: number of `SharedPtr`s. The decrement that takes it to zero
//!   drops the value, exactly once.
//! - `weak`: number of `WeakPtr`s, plus one held jointly by all
//!   `SharedPtr`s. The decrement that takes it to zero frees the block.
//!
//! [`WeakPtr::lock`] only increments `strong` while it is non-zero, so an
//! observer can never bring a destroyed value back.
//!
//! # Fatal conditions
//!
//! A count that would pass [`MAX_REFCOUNT`] or drop below zero means memory
//! safety can no longer be guaranteed. Both abort through the fatal
//! helpers of `inplace_error` instead of returning an error.
//!
//! # Examples
//!
//! ```
//! use inplace_foundation::handle::{make_shared, WeakPtr};
//!
//! let owner = make_shared(42u32);
//! let observer: WeakPtr<u32> = owner.downgrade();
//! assert_eq!(observer.use_count(), 1);
//!
//! let second = observer.lock().expect("owner still alive");
//! assert_eq!(second.get(), Some(&42));
//! drop(second);
//! drop(owner);
//!
//! assert!(observer.expired());
//! assert!(observer.lock().is_none());
//! ```

use alloc::boxed::Box;
use core::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
};

use inplace_error::{helpers, kinds, Error, Result};
use inplace_sync::{fence, AtomicUsizeCell, MemoryOrder};

use crate::limits::MAX_REFCOUNT;

struct ControlBlock<T> {
    strong: AtomicUsizeCell,
    weak: AtomicUsizeCell,
    /// Dropped by hand when `strong` reaches zero
    value: ManuallyDrop<T>,
}

impl<T> ControlBlock<T> {
    fn allocate(value: T) -> NonNull<Self> {
        let block = Box::new(Self {
            strong: AtomicUsizeCell::new(1),
            weak: AtomicUsizeCell::new(1),
            value: ManuallyDrop::new(value),
        });
        NonNull::from(Box::leak(block))
    }

    // The accessors below go through the raw pointer so that no reference
    // to the whole block, and therefore to `value`, is ever created.

    /// # Safety
    ///
    /// The block must still be allocated.
    unsafe fn strong<'a>(block: NonNull<Self>) -> &'a AtomicUsizeCell {
        // SAFETY: guaranteed by the caller.
        unsafe { &(*block.as_ptr()).strong }
    }

    /// # Safety
    ///
    /// The block must still be allocated.
    unsafe fn weak<'a>(block: NonNull<Self>) -> &'a AtomicUsizeCell {
        // SAFETY: guaranteed by the caller.
        unsafe { &(*block.as_ptr()).weak }
    }

    /// # Safety
    ///
    /// The block must still be allocated and the strong count non-zero for
    /// as long as the reference is used.
    unsafe fn value<'a>(block: NonNull<Self>) -> &'a T {
        // SAFETY: guaranteed by the caller.
        unsafe { &*(*block.as_ptr()).value }
    }

    /// Number of observers, excluding the reference held for the owners.
    ///
    /// # Safety
    ///
    /// The block must still be allocated.
    unsafe fn observers(block: NonNull<Self>) -> usize {
        // SAFETY: guaranteed by the caller.
        let (strong, weak) = unsafe { (Self::strong(block), Self::weak(block)) };
        let weak = weak.load(MemoryOrder::Acquire);
        if strong.load(MemoryOrder::Acquire) == 0 { weak } else { weak.saturating_sub(1) }
    }
}

/// Adds a reference to a count that the caller already holds one of.
fn retain(count: &AtomicUsizeCell) {
    // Relaxed: the caller's existing reference already orders access to
    // the block.
    let previous = count.fetch_add(1, MemoryOrder::Relaxed);
    if previous == 0 {
        helpers::fatal_copy_after_death();
    }
    if previous > MAX_REFCOUNT {
        helpers::fatal_refcount_overflow();
    }
}

/// Gives up one strong reference, dropping the value on the last one.
///
/// # Safety
///
/// The caller must own one strong reference to `block` and not use it
/// afterwards.
unsafe fn release_strong<T>(block: NonNull<ControlBlock<T>>) {
    // SAFETY: the caller's strong reference keeps the block allocated.
    let strong = unsafe { ControlBlock::strong(block) };
    match strong.fetch_sub(1, MemoryOrder::Release) {
        0 => helpers::fatal_refcount_underflow(),
        1 => {
            // Pairs with the Release decrements of the other owners so
            // their writes to the value happen before the drop.
            fence(MemoryOrder::Acquire);
            enter_span!(crate::tracing::HandleTrace::destroyed(core::any::type_name::<T>()));
            trace_event!(TRACE, pointee = core::any::type_name::<T>(), "shared value destroyed");
            // SAFETY: the strong count is zero, so no owner can reach the
            // value and observers never touch it. Only the `value` field
            // is borrowed mutably.
            unsafe { ManuallyDrop::drop(&mut (*block.as_ptr()).value) };
            // SAFETY: releases the weak reference held jointly by the
            // owners, which is still counted.
            unsafe { release_weak(block) };
        }
        _ => {}
    }
}

/// Gives up one weak reference, freeing the block on the last one.
///
/// # Safety
///
/// The caller must own one weak reference to `block` and not use it
/// afterwards.
unsafe fn release_weak<T>(block: NonNull<ControlBlock<T>>) {
    // SAFETY: the caller's weak reference keeps the block allocated.
    let weak = unsafe { ControlBlock::weak(block) };
    match weak.fetch_sub(1, MemoryOrder::Release) {
        0 => helpers::fatal_refcount_underflow(),
        1 => {
            fence(MemoryOrder::Acquire);
            // SAFETY: both counts are zero, so this is the last pointer to
            // a block that came from `Box::leak`. The value was already
            // dropped and `ManuallyDrop` keeps it from being dropped again.
            drop(unsafe { Box::from_raw(block.as_ptr()) });
        }
        _ => {}
    }
}

/// Handles that can be ordered by the control block they share.
pub trait SharedOwnership {
    /// Address of the control block, or 0 for a null handle.
    fn owner_id(&self) -> usize;

    /// Strict weak ordering by control block.
    ///
    /// Owners and observers of the same value are equivalent: neither is
    /// before the other, whatever their type.
    fn owner_before<O: SharedOwnership + ?Sized>(&self, other: &O) -> bool {
        self.owner_id() < other.owner_id()
    }
}

/// Owning reference-counted handle.
///
/// A `SharedPtr` may be null (see [`SharedPtr::null`] and
/// [`SharedPtr::reset`]), so the value is reached through [`SharedPtr::get`]
/// or [`SharedPtr::try_get`] rather than `Deref`.
///
/// # Examples
///
/// ```
/// use inplace_foundation::SharedPtr;
///
/// let a = SharedPtr::new(String::from("sensor"));
/// let b = a.clone();
/// assert_eq!(a.use_count(), 2);
/// assert!(a.ptr_eq(&b));
///
/// let mut b = b;
/// b.reset();
/// assert!(b.is_null());
/// assert_eq!(a.use_count(), 1);
/// assert_eq!(a.try_unwrap().ok().as_deref(), Some("sensor"));
/// ```
pub struct SharedPtr<T> {
    block: Option<NonNull<ControlBlock<T>>>,
    _marker: PhantomData<ControlBlock<T>>,
}

// SAFETY: the value is shared between threads through clones and dropped
// by whichever thread releases last, so it must be both Send and Sync. The
// counts are atomic.
unsafe impl<T: Send + Sync> Send for SharedPtr<T> {}
// SAFETY: see the Send impl.
unsafe impl<T: Send + Sync> Sync for SharedPtr<T> {}

impl<T> SharedPtr<T> {
    /// Moves `value` into a new control block with one owner.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { block: Some(ControlBlock::allocate(value)), _marker: PhantomData }
    }

    /// Creates a handle that owns nothing.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Self { block: None, _marker: PhantomData }
    }

    /// Returns the value, or `None` for a null handle.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        // SAFETY: this handle holds a strong reference for as long as the
        // returned borrow lives.
        self.block.map(|block| unsafe { ControlBlock::value(block) })
    }

    /// Returns the value.
    ///
    /// # Errors
    ///
    /// Returns `Err(NullHandle)` for a null handle.
    pub fn try_get(&self) -> Result<&T> {
        self.get().ok_or(Error::NULL_HANDLE)
    }

    /// Returns `true` if the handle owns nothing.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.block.is_none()
    }

    /// Number of owners of the value, 0 for a null handle.
    #[must_use]
    pub fn use_count(&self) -> usize {
        // SAFETY: our strong reference keeps the block allocated.
        self.block.map_or(0, |block| unsafe { ControlBlock::strong(block) }.load(MemoryOrder::Acquire))
    }

    /// Number of observers of the value, 0 for a null handle.
    #[must_use]
    pub fn weak_count(&self) -> usize {
        // SAFETY: our strong reference keeps the block allocated.
        self.block.map_or(0, |block| unsafe { ControlBlock::observers(block) })
    }

    /// Creates an observer of this handle's value.
    ///
    /// Downgrading a null handle yields a null observer.
    #[must_use]
    pub fn downgrade(&self) -> WeakPtr<T> {
        if let Some(block) = self.block {
            // SAFETY: our strong reference keeps the block allocated.
            retain(unsafe { ControlBlock::weak(block) });
        }
        WeakPtr { block: self.block, _marker: PhantomData }
    }

    /// Gives up ownership and becomes null.
    ///
    /// If this was the last owner the value is dropped.
    pub fn reset(&mut self) {
        if let Some(block) = self.block.take() {
            // SAFETY: the strong reference moved out of `self`.
            unsafe { release_strong(block) };
        }
    }

    /// Gives up ownership and takes sole ownership of `value` instead.
    ///
    /// The new control block is built before the old value is released, so
    /// a handle reset to a value that the old pointee owns stays valid.
    /// Observers of the old value expire if this was its last owner.
    pub fn reset_with(&mut self, value: T) {
        let previous = mem::replace(self, Self::new(value));
        drop(previous);
    }

    /// Exchanges the values owned by two handles.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.block, &mut other.block);
    }

    /// Returns `true` if both handles share a control block, or both are
    /// null.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.block == other.block
    }

    /// Returns the value if this is its only owner.
    ///
    /// Observers see the value as expired afterwards.
    ///
    /// # Errors
    ///
    /// Gives the handle back unchanged if it is null or the value has
    /// other owners.
    pub fn try_unwrap(self) -> core::result::Result<T, Self> {
        let Some(block) = self.block else {
            return Err(self);
        };
        let mut expected = 1;
        // SAFETY: our strong reference keeps the block allocated.
        let strong = unsafe { ControlBlock::strong(block) };
        if !strong.compare_exchange(&mut expected, 0, MemoryOrder::Acquire) {
            return Err(self);
        }
        // The exchange consumed this handle's strong reference.
        mem::forget(self);
        // SAFETY: the strong count went from 1 to 0 under our reference, so
        // nothing else can reach the value; it is read out exactly once and
        // `ManuallyDrop` keeps the block from dropping it again.
        let value = unsafe { ptr::read(&(*block.as_ptr()).value) };
        // SAFETY: releases the owners' joint weak reference.
        unsafe { release_weak(block) };
        Ok(ManuallyDrop::into_inner(value))
    }
}

/// Moves `value` into a new [`SharedPtr`].
#[inline]
#[must_use]
pub fn make_shared<T>(value: T) -> SharedPtr<T> {
    SharedPtr::new(value)
}

impl<T> Clone for SharedPtr<T> {
    /// Adds an owner.
    ///
    /// Aborts if the owner count would overflow [`MAX_REFCOUNT`].
    fn clone(&self) -> Self {
        if let Some(block) = self.block {
            // SAFETY: our strong reference keeps the block allocated.
            retain(unsafe { ControlBlock::strong(block) });
        }
        Self { block: self.block, _marker: PhantomData }
    }
}

impl<T> Drop for SharedPtr<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for SharedPtr<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<T> for SharedPtr<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> SharedOwnership for SharedPtr<T> {
    fn owner_id(&self) -> usize {
        self.block.map_or(0, |block| block.as_ptr().addr())
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("SharedPtr").field(value).finish(),
            None => f.write_str("SharedPtr(null)"),
        }
    }
}

/// Non-owning observer of a [`SharedPtr`] value.
///
/// An observer keeps the control block allocated but not the value.
pub struct WeakPtr<T> {
    block: Option<NonNull<ControlBlock<T>>>,
    _marker: PhantomData<ControlBlock<T>>,
}

// SAFETY: an observer can be turned into an owner on another thread, so
// the bounds match SharedPtr's.
unsafe impl<T: Send + Sync> Send for WeakPtr<T> {}
// SAFETY: see the Send impl.
unsafe impl<T: Send + Sync> Sync for WeakPtr<T> {}

impl<T> WeakPtr<T> {
    /// Creates an observer of nothing. It is always expired.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { block: None, _marker: PhantomData }
    }

    /// Number of owners of the observed value; 0 once it is destroyed or
    /// for a null observer.
    #[must_use]
    pub fn use_count(&self) -> usize {
        // SAFETY: our weak reference keeps the block allocated.
        self.block.map_or(0, |block| unsafe { ControlBlock::strong(block) }.load(MemoryOrder::Acquire))
    }

    /// Number of observers of the value, including this one.
    #[must_use]
    pub fn weak_count(&self) -> usize {
        // SAFETY: our weak reference keeps the block allocated.
        self.block.map_or(0, |block| unsafe { ControlBlock::observers(block) })
    }

    /// Returns `true` once the observed value has been destroyed.
    #[inline]
    #[must_use]
    pub fn expired(&self) -> bool {
        self.use_count() == 0
    }

    /// Becomes an owner of the value if it is still alive.
    ///
    /// The owner count is only incremented while it is non-zero, so a value
    /// whose last owner is concurrently being dropped is never revived.
    #[must_use]
    pub fn lock(&self) -> Option<SharedPtr<T>> {
        let block = self.block?;
        // SAFETY: our weak reference keeps the block allocated.
        let strong = unsafe { ControlBlock::strong(block) };
        let acquired = strong.fetch_update(MemoryOrder::Acquire, |count| match count {
            0 => None,
            count if count > MAX_REFCOUNT => helpers::fatal_refcount_overflow(),
            count => Some(count + 1),
        });
        if acquired.is_ok() {
            return Some(SharedPtr { block: Some(block), _marker: PhantomData });
        }
        enter_span!(crate::tracing::HandleTrace::lock_failed(core::any::type_name::<T>()));
        trace_event!(DEBUG, pointee = core::any::type_name::<T>(), "lock on expired observer");
        None
    }

    /// Like [`WeakPtr::lock`], reporting why no owner was produced.
    ///
    /// # Errors
    ///
    /// Returns `Err(NullHandle)` for a null observer and
    /// `Err(UseAfterExpiry)` once the value has been destroyed.
    pub fn try_lock(&self) -> Result<SharedPtr<T>> {
        if self.block.is_none() {
            return Err(Error::NULL_HANDLE);
        }
        self.lock().ok_or_else(|| kinds::ExpiredError.into())
    }

    /// Stops observing and becomes null.
    pub fn reset(&mut self) {
        if let Some(block) = self.block.take() {
            // SAFETY: the weak reference moved out of `self`.
            unsafe { release_weak(block) };
        }
    }

    /// Exchanges the values observed by two handles.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.block, &mut other.block);
    }

    /// Returns `true` if both observers share a control block, or both are
    /// null.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.block == other.block
    }
}

impl<T> Clone for WeakPtr<T> {
    fn clone(&self) -> Self {
        if let Some(block) = self.block {
            // SAFETY: our weak reference keeps the block allocated.
            retain(unsafe { ControlBlock::weak(block) });
        }
        Self { block: self.block, _marker: PhantomData }
    }
}

impl<T> Drop for WeakPtr<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for WeakPtr<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<&SharedPtr<T>> for WeakPtr<T> {
    fn from(owner: &SharedPtr<T>) -> Self {
        owner.downgrade()
    }
}

impl<T> SharedOwnership for WeakPtr<T> {
    fn owner_id(&self) -> usize {
        self.block.map_or(0, |block| block.as_ptr().addr())
    }
}

impl<T> fmt::Debug for WeakPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(WeakPtr)")
    }
}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_refcount_balance() {
        let first = SharedPtr::new(7u8);
        let second = first.clone();
        let observer = first.downgrade();
        assert!(first.use_count() == 2);
        assert!(observer.weak_count() == 1);

        if kani::any() {
            drop(first);
            assert!(!observer.expired());
            drop(second);
        } else {
            drop(second);
            assert!(!observer.expired());
            drop(first);
        }

        assert!(observer.expired());
        assert!(observer.lock().is_none());
    }
}

// ============================================================================
// Tests
// ============================================================================
