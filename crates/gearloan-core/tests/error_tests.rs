// Rust guideline compliant 2026-10-19

//! Unit tests for error types and messages.
//!
//! These tests validate error formatting and context preservation.

use gearloan_core::Error;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.json not found");
    let error = Error::Io(io_err);
    let msg = error.to_string();
    assert!(msg.contains("IO error"), "IO error should contain 'IO error' prefix");
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("{items: ")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::Json(json_err);
    assert!(error.to_string().contains("JSON error"));
}

#[test]
fn test_not_found_error_formatting() {
    let error = Error::NotFound("item EQ404".to_string());
    assert_eq!(error.to_string(), "Not found: item EQ404");
}

#[test]
fn test_item_unavailable_error_formatting() {
    let error = Error::ItemUnavailable("EQ004 has no units left".to_string());
    assert_eq!(error.to_string(), "Item unavailable: EQ004 has no units left");
}

#[test]
fn test_already_returned_error_formatting() {
    let error = Error::AlreadyReturned("br-3fa9c210".to_string());
    let msg = error.to_string();
    assert!(msg.contains("already returned"));
    assert!(msg.contains("br-3fa9c210"), "Should include record ID in message");
}

#[test]
fn test_ambiguous_id_lists_matches() {
    let error = Error::AmbiguousId(
        "br-3f".to_string(),
        vec!["br-3fa9c210".to_string(), "br-3fb01d77".to_string()],
    );
    let msg = error.to_string();
    assert!(msg.contains("br-3fa9c210"));
    assert!(msg.contains("br-3fb01d77"));
}

#[test]
fn test_error_from_conversions() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(matches!(Error::from(io_err), Error::Io(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("[").expect_err("Should fail");
    assert!(matches!(Error::from(json_err), Error::Json(_)));
}
