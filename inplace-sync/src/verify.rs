//! Formal verification for the atomic primitives using Kani.
//!
//! These proofs check single-threaded functional properties of the cell
//! operations. They only run with Kani and are isolated from normal
//! compilation and testing.

#[cfg(any(doc, kani))]
pub mod kani_verification {
    use crate::{AtomicCell, AtomicCounter, AtomicFlag, MemoryOrder};

    /// `fetch_add` returns the value held before the update and leaves the
    /// wrapping sum behind.
    #[cfg_attr(kani, kani::proof)]
    pub fn verify_fetch_returns_previous() {
        let initial: u32 = kani::any();
        let delta: u32 = kani::any();
        let cell = AtomicCell::new(initial);
        assert_eq!(cell.fetch_add(delta, MemoryOrder::SeqCst), initial);
        assert_eq!(cell.load(MemoryOrder::SeqCst), initial.wrapping_add(delta));
    }

    /// A failed compare-exchange writes the observed value back into
    /// `expected` and leaves the cell untouched.
    #[cfg_attr(kani, kani::proof)]
    pub fn verify_compare_exchange_reports_current() {
        let initial: u16 = kani::any();
        let mut expected: u16 = kani::any();
        let guess = expected;
        let cell = AtomicCell::new(initial);
        let swapped = cell.compare_exchange(&mut expected, 7, MemoryOrder::AcqRel);
        assert_eq!(swapped, guess == initial);
        if !swapped {
            assert_eq!(expected, initial);
            assert_eq!(cell.load(MemoryOrder::Acquire), initial);
        }
    }

    /// A checked decrement never takes the counter below zero.
    #[cfg_attr(kani, kani::proof)]
    pub fn verify_checked_decrement_floor() {
        let start: u8 = kani::any();
        let counter: AtomicCounter<u8> = AtomicCounter::new(start);
        let result = counter.checked_decrement();
        assert_eq!(result.is_err(), start == 0);
        assert_eq!(counter.value(), start.saturating_sub(1));
    }

    /// `test_and_set` reports the previous state.
    #[cfg_attr(kani, kani::proof)]
    pub fn verify_flag_test_and_set() {
        let flag = AtomicFlag::new();
        if kani::any() {
            flag.test_and_set(MemoryOrder::Relaxed);
        }
        let before = flag.test(MemoryOrder::SeqCst);
        assert_eq!(flag.test_and_set(MemoryOrder::SeqCst), before);
        assert!(flag.test(MemoryOrder::SeqCst));
    }
}

#[cfg(kani)]
pub use kani_verification::*;
