// inplace - inplace-sync
// Module: Atomic Cell
// SW-REQ-ID: REQ_CONCURRENCY_001
//
// Copyright (c) 2026 The inplace Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Typed atomic cells with an explicit memory-ordering parameter.
//!
//! [`AtomicCell<T>`] wraps the native `core::sync::atomic` type for `T` and
//! exposes the classic operation family: load, store, exchange, compare and
//! exchange, `fetch_<op>` (returns the previous value) and `<op>_fetch`
//! (returns the new value).
//!
//! Every operation takes a [`MemoryOrder`]. Orders that make no sense for an
//! operation are reduced to the part that applies: a load ignores the
//! release half, a store ignores the acquire half. `Consume` is always
//! treated as `Acquire`.
//!
//! Only widths the target supports natively are implemented, so every cell
//! is lock-free.

use core::{
    fmt,
    sync::atomic::{self, AtomicBool, Ordering},
};

#[cfg(target_has_atomic = "16")]
use core::sync::atomic::{AtomicI16, AtomicU16};
#[cfg(target_has_atomic = "32")]
use core::sync::atomic::{AtomicI32, AtomicU32};
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicI64, AtomicU64};
#[cfg(target_has_atomic = "8")]
use core::sync::atomic::{AtomicI8, AtomicU8};
#[cfg(target_has_atomic = "ptr")]
use core::sync::atomic::{AtomicIsize, AtomicUsize};

/// Memory ordering constraint for an atomic operation.
///
/// Mirrors the six orderings of the C11 memory model. `Consume` has no
/// distinct hardware meaning on any supported target and maps to `Acquire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryOrder {
    /// No ordering constraint, only atomicity.
    Relaxed,
    /// Treated as [`MemoryOrder::Acquire`].
    Consume,
    /// Later reads and writes are not reordered before this load.
    Acquire,
    /// Earlier reads and writes are not reordered after this store.
    Release,
    /// Both `Acquire` and `Release`, for read-modify-write operations.
    AcqRel,
    /// Sequentially consistent. The default.
    #[default]
    SeqCst,
}

impl MemoryOrder {
    /// Ordering used for read-modify-write operations.
    #[inline]
    #[must_use]
    pub const fn rmw(self) -> Ordering {
        match self {
            Self::Relaxed => Ordering::Relaxed,
            Self::Consume | Self::Acquire => Ordering::Acquire,
            Self::Release => Ordering::Release,
            Self::AcqRel => Ordering::AcqRel,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// Ordering used for a plain load. The release half is dropped.
    #[inline]
    #[must_use]
    pub const fn load(self) -> Ordering {
        match self {
            Self::Relaxed | Self::Release => Ordering::Relaxed,
            Self::Consume | Self::Acquire | Self::AcqRel => Ordering::Acquire,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// Ordering used for a plain store. The acquire half is dropped.
    #[inline]
    #[must_use]
    pub const fn store(self) -> Ordering {
        match self {
            Self::Relaxed | Self::Consume | Self::Acquire => Ordering::Relaxed,
            Self::Release | Self::AcqRel => Ordering::Release,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// Ordering applied when a compare-exchange fails.
    ///
    /// A failed compare-exchange is only a load, so this equals
    /// [`MemoryOrder::load`].
    #[inline]
    #[must_use]
    pub const fn failure(self) -> Ordering {
        self.load()
    }

    /// Ordering used for a standalone fence. `Relaxed` has no fence form and
    /// yields `None`.
    #[inline]
    #[must_use]
    pub const fn fence(self) -> Option<Ordering> {
        match self {
            Self::Relaxed => None,
            other => Some(other.rmw()),
        }
    }
}

impl From<MemoryOrder> for Ordering {
    fn from(order: MemoryOrder) -> Self {
        order.rmw()
    }
}

/// Issues a memory fence with the given ordering.
///
/// A `Relaxed` fence is a no-op.
#[inline]
pub fn fence(order: MemoryOrder) {
    if let Some(ordering) = order.fence() {
        atomic::fence(ordering);
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A value type with a native atomic counterpart.
///
/// Implemented for `bool` and every integer width the target supports.
/// This trait is sealed.
pub trait AtomicPrimitive: Copy + Eq + fmt::Debug + Default + sealed::Sealed {
    /// The `core::sync::atomic` type backing this value.
    type Atomic: Send + Sync;

    /// Wraps a value in its atomic type.
    fn new_atomic(value: Self) -> Self::Atomic;
    /// Unwraps an atomic.
    fn into_value(atomic: Self::Atomic) -> Self;
    /// Exclusive access to the value.
    fn value_mut(atomic: &mut Self::Atomic) -> &mut Self;
    /// Atomic load.
    fn atomic_load(atomic: &Self::Atomic, order: Ordering) -> Self;
    /// Atomic store.
    fn atomic_store(atomic: &Self::Atomic, value: Self, order: Ordering);
    /// Atomic swap, returning the previous value.
    fn atomic_swap(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Strong compare-exchange.
    fn atomic_compare_exchange(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
    /// Weak compare-exchange, which may fail spuriously.
    fn atomic_compare_exchange_weak(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

/// Atomic bitwise operations.
pub trait AtomicBits: AtomicPrimitive {
    /// Atomic AND, returning the previous value.
    fn atomic_and(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Atomic OR, returning the previous value.
    fn atomic_or(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Atomic XOR, returning the previous value.
    fn atomic_xor(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Non-atomic AND used to derive `and_fetch` results.
    fn bit_and(a: Self, b: Self) -> Self;
    /// Non-atomic OR used to derive `or_fetch` results.
    fn bit_or(a: Self, b: Self) -> Self;
    /// Non-atomic XOR used to derive `xor_fetch` results.
    fn bit_xor(a: Self, b: Self) -> Self;
}

/// Atomic arithmetic. Arithmetic wraps on overflow.
pub trait AtomicInteger: AtomicBits + Ord {
    /// The additive identity.
    const ZERO: Self;
    /// The value one.
    const ONE: Self;
    /// Atomic wrapping add, returning the previous value.
    fn atomic_add(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Atomic wrapping subtract, returning the previous value.
    fn atomic_sub(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    /// Non-atomic wrapping add.
    fn wrapping_add(a: Self, b: Self) -> Self;
    /// Non-atomic wrapping subtract.
    fn wrapping_sub(a: Self, b: Self) -> Self;
}

macro_rules! impl_atomic_common {
    ($t:ty, $atomic:ty) => {
        impl sealed::Sealed for $t {}

        impl AtomicPrimitive for $t {
            type Atomic = $atomic;

            #[inline]
            fn new_atomic(value: Self) -> $atomic {
                <$atomic>::new(value)
            }

            #[inline]
            fn into_value(atomic: $atomic) -> Self {
                atomic.into_inner()
            }

            #[inline]
            fn value_mut(atomic: &mut $atomic) -> &mut Self {
                atomic.get_mut()
            }

            #[inline]
            fn atomic_load(atomic: &$atomic, order: Ordering) -> Self {
                atomic.load(order)
            }

            #[inline]
            fn atomic_store(atomic: &$atomic, value: Self, order: Ordering) {
                atomic.store(value, order);
            }

            #[inline]
            fn atomic_swap(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                atomic.swap(value, order)
            }

            #[inline]
            fn atomic_compare_exchange(
                atomic: &$atomic,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atomic.compare_exchange(current, new, success, failure)
            }

            #[inline]
            fn atomic_compare_exchange_weak(
                atomic: &$atomic,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atomic.compare_exchange_weak(current, new, success, failure)
            }
        }

        impl AtomicBits for $t {
            #[inline]
            fn atomic_and(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_and(value, order)
            }

            #[inline]
            fn atomic_or(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_or(value, order)
            }

            #[inline]
            fn atomic_xor(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_xor(value, order)
            }

            #[inline]
            fn bit_and(a: Self, b: Self) -> Self {
                a & b
            }

            #[inline]
            fn bit_or(a: Self, b: Self) -> Self {
                a | b
            }

            #[inline]
            fn bit_xor(a: Self, b: Self) -> Self {
                a ^ b
            }
        }
    };
}

macro_rules! impl_atomic_integer {
    ($($t:ty => $atomic:ty),* $(,)?) => {
        $(
            impl_atomic_common!($t, $atomic);

            impl AtomicInteger for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn atomic_add(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                    atomic.fetch_add(value, order)
                }

                #[inline]
                fn atomic_sub(atomic: &$atomic, value: Self, order: Ordering) -> Self {
                    atomic.fetch_sub(value, order)
                }

                #[inline]
                fn wrapping_add(a: Self, b: Self) -> Self {
                    a.wrapping_add(b)
                }

                #[inline]
                fn wrapping_sub(a: Self, b: Self) -> Self {
                    a.wrapping_sub(b)
                }
            }
        )*
    };
}

impl_atomic_common!(bool, AtomicBool);

#[cfg(target_has_atomic = "8")]
impl_atomic_integer!(u8 => AtomicU8, i8 => AtomicI8);
#[cfg(target_has_atomic = "16")]
impl_atomic_integer!(u16 => AtomicU16, i16 => AtomicI16);
#[cfg(target_has_atomic = "32")]
impl_atomic_integer!(u32 => AtomicU32, i32 => AtomicI32);
#[cfg(target_has_atomic = "64")]
impl_atomic_integer!(u64 => AtomicU64, i64 => AtomicI64);
#[cfg(target_has_atomic = "ptr")]
impl_atomic_integer!(usize => AtomicUsize, isize => AtomicIsize);

/// An atomically accessed value of type `T`.
///
/// All operations take `&self`; the cell is `Sync` and can be shared
/// between threads directly or inside a reference-counted block. Cells are
/// not `Clone`. Copy the value out with [`AtomicCell::load`] instead.
///
/// # Examples
///
/// ```
/// use inplace_sync::{AtomicCell, MemoryOrder};
///
/// let cell = AtomicCell::new(5u32);
/// assert_eq!(cell.fetch_add(3, MemoryOrder::AcqRel), 5);
/// assert_eq!(cell.sub_fetch(1, MemoryOrder::AcqRel), 7);
///
/// let mut expected = 7;
/// assert!(cell.compare_exchange(&mut expected, 42, MemoryOrder::SeqCst));
///
/// let mut stale = 7;
/// assert!(!cell.compare_exchange(&mut stale, 0, MemoryOrder::SeqCst));
/// assert_eq!(stale, 42);
/// ```
pub struct AtomicCell<T: AtomicPrimitive> {
    inner: T::Atomic,
}

impl<T: AtomicPrimitive> AtomicCell<T> {
    /// Creates a cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self { inner: T::new_atomic(value) }
    }

    /// Consumes the cell and returns the value.
    #[inline]
    pub fn into_inner(self) -> T {
        T::into_value(self.inner)
    }

    /// Returns a mutable reference to the value. Exclusive access makes
    /// this non-atomic.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        T::value_mut(&mut self.inner)
    }

    /// Atomically reads the value.
    #[inline]
    pub fn load(&self, order: MemoryOrder) -> T {
        T::atomic_load(&self.inner, order.load())
    }

    /// Atomically replaces the value.
    #[inline]
    pub fn store(&self, value: T, order: MemoryOrder) {
        T::atomic_store(&self.inner, value, order.store());
    }

    /// Atomically replaces the value, returning the previous one.
    #[inline]
    pub fn exchange(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_swap(&self.inner, value, order.rmw())
    }

    /// Replaces the value with `desired` if it equals `*expected`.
    ///
    /// Returns `true` on success. On failure `*expected` is overwritten with
    /// the value actually observed and `false` is returned.
    #[inline]
    pub fn compare_exchange(&self, expected: &mut T, desired: T, order: MemoryOrder) -> bool {
        match T::atomic_compare_exchange(
            &self.inner,
            *expected,
            desired,
            order.rmw(),
            order.failure(),
        ) {
            Ok(_) => true,
            Err(actual) => {
                *expected = actual;
                false
            }
        }
    }

    /// Like [`AtomicCell::compare_exchange`] but may fail spuriously even
    /// when the values compare equal. Intended for retry loops.
    #[inline]
    pub fn compare_exchange_weak(&self, expected: &mut T, desired: T, order: MemoryOrder) -> bool {
        match T::atomic_compare_exchange_weak(
            &self.inner,
            *expected,
            desired,
            order.rmw(),
            order.failure(),
        ) {
            Ok(_) => true,
            Err(actual) => {
                *expected = actual;
                false
            }
        }
    }

    /// Repeatedly applies `f` to the current value until the update lands or
    /// `f` returns `None`.
    ///
    /// Returns `Ok(previous)` when the value was updated and
    /// `Err(current)` when `f` declined.
    pub fn fetch_update<F>(&self, order: MemoryOrder, mut f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        let mut current = self.load(order);
        while let Some(next) = f(current) {
            if self.compare_exchange_weak(&mut current, next, order) {
                return Ok(current);
            }
            core::hint::spin_loop();
        }
        Err(current)
    }

    /// Whether operations on this cell are lock-free.
    ///
    /// Cells only exist for natively supported widths, so this is always
    /// `true`.
    #[inline]
    #[must_use]
    pub const fn is_lock_free(&self) -> bool {
        true
    }
}

impl<T: AtomicBits> AtomicCell<T> {
    /// Bitwise AND, returning the previous value.
    #[inline]
    pub fn fetch_and(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_and(&self.inner, value, order.rmw())
    }

    /// Bitwise OR, returning the previous value.
    #[inline]
    pub fn fetch_or(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_or(&self.inner, value, order.rmw())
    }

    /// Bitwise XOR, returning the previous value.
    #[inline]
    pub fn fetch_xor(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_xor(&self.inner, value, order.rmw())
    }

    /// Bitwise AND, returning the new value.
    #[inline]
    pub fn and_fetch(&self, value: T, order: MemoryOrder) -> T {
        T::bit_and(self.fetch_and(value, order), value)
    }

    /// Bitwise OR, returning the new value.
    #[inline]
    pub fn or_fetch(&self, value: T, order: MemoryOrder) -> T {
        T::bit_or(self.fetch_or(value, order), value)
    }

    /// Bitwise XOR, returning the new value.
    #[inline]
    pub fn xor_fetch(&self, value: T, order: MemoryOrder) -> T {
        T::bit_xor(self.fetch_xor(value, order), value)
    }
}

impl<T: AtomicInteger> AtomicCell<T> {
    /// Wrapping add, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_add(&self.inner, value, order.rmw())
    }

    /// Wrapping subtract, returning the previous value.
    #[inline]
    pub fn fetch_sub(&self, value: T, order: MemoryOrder) -> T {
        T::atomic_sub(&self.inner, value, order.rmw())
    }

    /// Wrapping add, returning the new value.
    #[inline]
    pub fn add_fetch(&self, value: T, order: MemoryOrder) -> T {
        T::wrapping_add(self.fetch_add(value, order), value)
    }

    /// Wrapping subtract, returning the new value.
    #[inline]
    pub fn sub_fetch(&self, value: T, order: MemoryOrder) -> T {
        T::wrapping_sub(self.fetch_sub(value, order), value)
    }
}

impl<T: AtomicPrimitive> Default for AtomicCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicPrimitive> From<T> for AtomicCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicPrimitive> fmt::Debug for AtomicCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Relaxed: a snapshot is enough for diagnostics.
        f.debug_tuple("AtomicCell").field(&self.load(MemoryOrder::Relaxed)).finish()
    }
}

/// Atomic `bool`.
pub type AtomicBoolCell = AtomicCell<bool>;
/// Atomic `u8`.
#[cfg(target_has_atomic = "8")]
pub type AtomicU8Cell = AtomicCell<u8>;
/// Atomic `i8`.
#[cfg(target_has_atomic = "8")]
pub type AtomicI8Cell = AtomicCell<i8>;
/// Atomic `u16`.
#[cfg(target_has_atomic = "16")]
pub type AtomicU16Cell = AtomicCell<u16>;
/// Atomic `i16`.
#[cfg(target_has_atomic = "16")]
pub type AtomicI16Cell = AtomicCell<i16>;
/// Atomic `u32`.
#[cfg(target_has_atomic = "32")]
pub type AtomicU32Cell = AtomicCell<u32>;
/// Atomic `i32`.
#[cfg(target_has_atomic = "32")]
pub type AtomicI32Cell = AtomicCell<i32>;
/// Atomic `u64`.
#[cfg(target_has_atomic = "64")]
pub type AtomicU64Cell = AtomicCell<u64>;
/// Atomic `i64`.
#[cfg(target_has_atomic = "64")]
pub type AtomicI64Cell = AtomicCell<i64>;
/// Atomic `usize`, used for reference counts.
#[cfg(target_has_atomic = "ptr")]
pub type AtomicUsizeCell = AtomicCell<usize>;
/// Atomic `isize`.
#[cfg(target_has_atomic = "ptr")]
pub type AtomicIsizeCell = AtomicCell<isize>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_exchange() {
        let cell = AtomicI32Cell::new(-4);
        assert_eq!(cell.load(MemoryOrder::Acquire), -4);
        cell.store(10, MemoryOrder::Release);
        assert_eq!(cell.exchange(11, MemoryOrder::AcqRel), 10);
        assert_eq!(cell.load(MemoryOrder::SeqCst), 11);
    }

    #[test]
    fn test_fetch_op_returns_previous_and_op_fetch_returns_new() {
        let cell = AtomicU32Cell::new(0b1100);
        assert_eq!(cell.fetch_or(0b0011, MemoryOrder::SeqCst), 0b1100);
        assert_eq!(cell.and_fetch(0b0110, MemoryOrder::SeqCst), 0b0110);
        assert_eq!(cell.xor_fetch(0b0010, MemoryOrder::SeqCst), 0b0100);
        assert_eq!(cell.fetch_xor(0b0100, MemoryOrder::SeqCst), 0b0100);
        assert_eq!(cell.add_fetch(5, MemoryOrder::Relaxed), 5);
        assert_eq!(cell.fetch_sub(2, MemoryOrder::Relaxed), 5);
        assert_eq!(cell.load(MemoryOrder::Relaxed), 3);
    }

    #[test]
    fn test_arithmetic_wraps() {
        let cell = AtomicU8Cell::new(u8::MAX);
        assert_eq!(cell.add_fetch(1, MemoryOrder::SeqCst), 0);
        assert_eq!(cell.sub_fetch(1, MemoryOrder::SeqCst), u8::MAX);
    }

    #[test]
    fn test_compare_exchange_reports_observed_value() {
        let cell = AtomicUsizeCell::new(3);
        let mut expected = 4;
        assert!(!cell.compare_exchange(&mut expected, 9, MemoryOrder::SeqCst));
        assert_eq!(expected, 3);
        assert!(cell.compare_exchange(&mut expected, 9, MemoryOrder::SeqCst));
        assert_eq!(cell.load(MemoryOrder::SeqCst), 9);
    }

    #[test]
    fn test_compare_exchange_weak_eventually_succeeds() {
        let cell = AtomicU64Cell::new(1);
        let mut expected = 1;
        while !cell.compare_exchange_weak(&mut expected, 2, MemoryOrder::AcqRel) {
            assert_eq!(expected, 1);
        }
        assert_eq!(cell.load(MemoryOrder::Acquire), 2);
    }

    #[test]
    fn test_fetch_update_declines() {
        let cell = AtomicUsizeCell::new(0);
        assert_eq!(cell.fetch_update(MemoryOrder::SeqCst, |v| (v != 0).then(|| v + 1)), Err(0));
        cell.store(2, MemoryOrder::SeqCst);
        assert_eq!(cell.fetch_update(MemoryOrder::SeqCst, |v| (v != 0).then(|| v + 1)), Ok(2));
        assert_eq!(cell.load(MemoryOrder::SeqCst), 3);
    }

    #[test]
    fn test_bool_cell_bit_ops() {
        let flag = AtomicBoolCell::default();
        assert!(!flag.fetch_or(true, MemoryOrder::SeqCst));
        assert!(!flag.xor_fetch(true, MemoryOrder::SeqCst));
        assert!(flag.is_lock_free());
    }

    #[test]
    fn test_invalid_orders_are_reduced() {
        assert_eq!(MemoryOrder::Release.load(), Ordering::Relaxed);
        assert_eq!(MemoryOrder::AcqRel.load(), Ordering::Acquire);
        assert_eq!(MemoryOrder::Acquire.store(), Ordering::Relaxed);
        assert_eq!(MemoryOrder::AcqRel.store(), Ordering::Release);
        assert_eq!(MemoryOrder::Consume.rmw(), Ordering::Acquire);
        assert_eq!(MemoryOrder::SeqCst.failure(), Ordering::SeqCst);
        assert_eq!(MemoryOrder::Relaxed.fence(), None);
        assert_eq!(MemoryOrder::default(), MemoryOrder::SeqCst);
    }

    #[test]
    fn test_every_order_accepted_by_every_operation() {
        let orders = [
            MemoryOrder::Relaxed,
            MemoryOrder::Consume,
            MemoryOrder::Acquire,
            MemoryOrder::Release,
            MemoryOrder::AcqRel,
            MemoryOrder::SeqCst,
        ];
        let cell = AtomicI64Cell::new(0);
        for order in orders {
            cell.store(1, order);
            let _ = cell.load(order);
            let _ = cell.exchange(2, order);
            let mut expected = 2;
            assert!(cell.compare_exchange(&mut expected, 0, order));
            fence(order);
        }
    }

    #[test]
    fn test_get_mut_and_into_inner() {
        let mut cell = AtomicI16Cell::from(7);
        *cell.get_mut() += 1;
        assert_eq!(cell.into_inner(), 8);
    }
}
