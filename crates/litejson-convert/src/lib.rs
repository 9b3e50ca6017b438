//! litejson conversion pipeline
//!
//! Turns an uploaded SQLite database into a size-bounded JSON record:
//! validate → stage → introspect → extract → assemble.
//!
//! The single entry point is [`Converter::convert`], which always yields a
//! [`ResponseEnvelope`](litejson_core::ResponseEnvelope) and leaves no staged file behind.

pub mod converter;
pub mod error;
pub mod extract;
pub mod introspect;
pub mod staging;
pub mod validator;

pub use converter::Converter;
pub use error::ConvertError;
pub use staging::{StagedFile, StagingArea, StagingError};
pub use validator::{InputValidator, ValidationError};
