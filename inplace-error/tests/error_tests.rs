//! Integration tests for the inplace-error crate.

use inplace_error::{codes, kinds, Error, ErrorCategory, ErrorSource, Result, ToErrorCategory};

fn pop_from_empty() -> Result<u32> {
    Err(kinds::EmptyError.into())
}

fn caller() -> Result<u32> {
    let value = pop_from_empty()?;
    Ok(value + 1)
}

#[test]
fn test_question_mark_propagates_kind() {
    let error = caller().unwrap_err();
    assert_eq!(error.code, codes::EMPTY_CONTAINER);
    assert_eq!(error.to_category(), ErrorCategory::Container);
}

#[test]
fn test_display_format() {
    let error = Error::key_not_found("Key not found in FixedMap");
    let text = format!("{error}");
    assert_eq!(text, "[Lookup][E04B0] Key not found in FixedMap");
}

#[test]
fn test_error_source_trait() {
    let error = Error::use_after_expiry("expired");
    let source: &dyn ErrorSource = &error;
    assert_eq!(source.code(), codes::USE_AFTER_EXPIRY);
    assert_eq!(source.message(), "expired");
    assert_eq!(source.category(), ErrorCategory::Lifetime);
}

#[test]
fn test_kind_display() {
    assert_eq!(
        format!("{}", kinds::OutOfBoundsError { index: 9, len: 4 }),
        "Index 9 out of bounds for length 4"
    );
    assert_eq!(
        format!("{}", kinds::capacity_error(8)),
        "Capacity of 8 elements exceeded"
    );
}
