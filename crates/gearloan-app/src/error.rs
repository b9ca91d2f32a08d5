// Rust guideline compliant 2026-10-19

//! Error handling for Gearloan application services.

use gearloan_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for callers of the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Unknown item or record.
    NotFound,
    /// No free unit, under maintenance, or retired.
    ItemUnavailable,
    /// Malformed or missing fields, or non-chronological dates.
    InvalidRequest,
    /// Double return attempt.
    AlreadyReturned,
    /// The provided partial record ID matched multiple records.
    AmbiguousId,
    /// Internal consistency failure. Not actionable by the caller.
    Internal,
    /// IO failure while reading seed or config files.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
    /// Configuration is invalid.
    ConfigError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidRequest,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::ItemUnavailable(_) => ErrorCode::ItemUnavailable,
                CoreError::InvalidRequest(_) => ErrorCode::InvalidRequest,
                CoreError::AlreadyReturned(_) => ErrorCode::AlreadyReturned,
                CoreError::AmbiguousId(_, _) => ErrorCode::AmbiguousId,
                CoreError::InternalInvariantViolation(_) => ErrorCode::Internal,
                CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns true for failures the caller cannot fix by changing input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.code() == ErrorCode::Internal
    }

    /// Message safe to show to an end user.
    ///
    /// Internal failures are reported generically; their detail goes to logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            "Internal error; the operation was not applied".to_string()
        } else {
            self.to_string()
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Core(CoreError::AmbiguousId(partial, matches)) => Some(serde_json::json!({
                "partial": partial,
                "matches": matches,
            })),
            _ => None,
        }
    }
}
