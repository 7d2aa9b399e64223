//! Formal verification for the error handling system using Kani.
//!
//! These proofs only run with `cargo kani --features kani`.

#[cfg(kani)]
pub mod kani_verification {
    use crate::{codes, kinds, Error, ErrorCategory};

    /// Verify that named constructors carry the matching code and category
    #[kani::proof]
    pub fn verify_error_creation_safety() {
        let error = Error::capacity_exceeded("verification test");
        assert!(error.category == ErrorCategory::Capacity);
        assert!(error.code == codes::CAPACITY_EXCEEDED);
        assert!(!error.is_fatal());

        let fatal = Error::refcount_underflow("verification test");
        assert!(fatal.is_fatal());
    }

    /// Verify that kind conversion preserves the category
    #[kani::proof]
    pub fn verify_kind_conversion() {
        let index: usize = kani::any();
        let len: usize = kani::any();
        let error: Error = kinds::OutOfBoundsError { index, len }.into();
        assert!(error.category == ErrorCategory::Container);
    }
}

#[cfg(kani)]
pub use kani_verification::*;
