//! litejson Core Library
//!
//! This crate provides the configuration, error taxonomy and data model shared by the
//! conversion pipeline and the HTTP surface.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ConverterConfig, SQLITE_MAGIC_HEADER};
pub use error::{ConversionError, ErrorKind, ErrorMetadata, LogLevel};
pub use models::{
    ConversionResult, ResponseEnvelope, ResponseMeta, Row, SqlValue, TableDescriptor,
    UploadedFile,
};
