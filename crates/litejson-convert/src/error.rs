//! Pipeline error type and its classification into the client-facing taxonomy.

use litejson_core::{ConversionError, ErrorKind};

use crate::introspect::SchemaError;
use crate::staging::StagingError;
use crate::validator::ValidationError;

const DATABASE_ERROR_MESSAGE: &str =
    "Failed to read database. The file may be corrupted or encrypted.";
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred while processing the file.";

/// Anything that can stop a conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Map onto the client-facing taxonomy.
    ///
    /// Database and staging failures are told apart by type. Only opaque errors fall back
    /// to looking for `database`/`SQL` in their message.
    pub fn to_conversion_error(&self) -> ConversionError {
        match self {
            ConvertError::Validation(err) => ConversionError::from(err.clone()),
            ConvertError::Schema(SchemaError::NoTablesFound) => ConversionError::new(
                ErrorKind::NoTablesFound,
                "The database contains no tables.",
            ),
            ConvertError::Schema(SchemaError::TooManyTables { found, max }) => {
                ConversionError::new(
                    ErrorKind::TooManyTables,
                    format!("Database has too many tables. Maximum allowed: {}", max),
                )
                .with_details(format!("Found: {} tables", found))
            }
            ConvertError::Database(err) => database_error(err.to_string()),
            ConvertError::Staging(err) => internal_error(err.to_string()),
            ConvertError::Other(err) => {
                let message = err.to_string();
                if mentions_database(&message) {
                    database_error(message)
                } else {
                    internal_error(message)
                }
            }
        }
    }
}

fn mentions_database(message: &str) -> bool {
    message.contains("database") || message.contains("SQL")
}

fn database_error(details: String) -> ConversionError {
    ConversionError::new(ErrorKind::DatabaseError, DATABASE_ERROR_MESSAGE).with_details(details)
}

fn internal_error(details: String) -> ConversionError {
    ConversionError::new(ErrorKind::InternalError, INTERNAL_ERROR_MESSAGE).with_details(details)
}
