//! Error types module
//!
//! This module provides the closed error taxonomy reported by the conversion pipeline.
//! Every failure a client can observe is one of the nine `ErrorKind` values, carried in a
//! `ConversionError` together with a client-facing message and optional diagnostic details.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Closed set of failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    FileRequired,
    FileTooLarge,
    FileTooSmall,
    InvalidExtension,
    InvalidSqliteFormat,
    NoTablesFound,
    TooManyTables,
    DatabaseError,
    InternalError,
}

/// Static metadata for each kind: (http_status, error_code, log_level).
fn kind_static_metadata(kind: &ErrorKind) -> (u16, &'static str, LogLevel) {
    match kind {
        ErrorKind::FileRequired => (400, "FILE_REQUIRED", LogLevel::Debug),
        ErrorKind::FileTooLarge => (413, "FILE_TOO_LARGE", LogLevel::Debug),
        ErrorKind::FileTooSmall => (400, "FILE_TOO_SMALL", LogLevel::Debug),
        ErrorKind::InvalidExtension => (400, "INVALID_EXTENSION", LogLevel::Debug),
        ErrorKind::InvalidSqliteFormat => (400, "INVALID_SQLITE_FORMAT", LogLevel::Debug),
        ErrorKind::NoTablesFound => (422, "NO_TABLES_FOUND", LogLevel::Warn),
        ErrorKind::TooManyTables => (422, "TOO_MANY_TABLES", LogLevel::Warn),
        ErrorKind::DatabaseError => (500, "DATABASE_ERROR", LogLevel::Error),
        ErrorKind::InternalError => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for ErrorKind {
    fn http_status_code(&self) -> u16 {
        kind_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        kind_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        kind_static_metadata(self).2
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_code())
    }
}

/// A classified failure as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ConversionError {
    pub code: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConversionError {
    pub fn new(code: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl ErrorMetadata for ConversionError {
    fn http_status_code(&self) -> u16 {
        self.code.http_status_code()
    }

    fn error_code(&self) -> &'static str {
        self.code.error_code()
    }

    fn log_level(&self) -> LogLevel {
        self.code.log_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [ErrorKind; 9] = [
        ErrorKind::FileRequired,
        ErrorKind::FileTooLarge,
        ErrorKind::FileTooSmall,
        ErrorKind::InvalidExtension,
        ErrorKind::InvalidSqliteFormat,
        ErrorKind::NoTablesFound,
        ErrorKind::TooManyTables,
        ErrorKind::DatabaseError,
        ErrorKind::InternalError,
    ];

    #[test]
    fn test_error_code_matches_serialized_name() {
        for kind in KINDS {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.error_code().to_string()));
        }
    }

    #[test]
    fn test_error_metadata_validation_kinds() {
        let err = ConversionError::new(ErrorKind::FileTooSmall, "too small");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "FILE_TOO_SMALL");
        assert_eq!(err.log_level(), LogLevel::Debug);

        assert_eq!(ErrorKind::FileTooLarge.http_status_code(), 413);
    }

    #[test]
    fn test_error_metadata_database() {
        let err = ConversionError::new(ErrorKind::DatabaseError, "Failed to read database.")
            .with_details("file is not a database");
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(err.details.as_deref(), Some("file is not a database"));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let err = ConversionError::new(ErrorKind::NoTablesFound, "The database contains no tables.");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "NO_TABLES_FOUND",
                "message": "The database contains no tables."
            })
        );
    }

    #[test]
    fn test_display() {
        let err = ConversionError::new(ErrorKind::TooManyTables, "Database has too many tables.");
        assert_eq!(err.to_string(), "TOO_MANY_TABLES: Database has too many tables.");
    }
}
