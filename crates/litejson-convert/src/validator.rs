use bytes::Bytes;
use litejson_core::{
    ConversionError, ConverterConfig, ErrorKind, UploadedFile, SQLITE_MAGIC_HEADER,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Structural validation errors for uploaded database files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No file provided")]
    FileRequired,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("File too small: {size} bytes (min: {min} bytes)")]
    FileTooSmall { size: u64, min: u64 },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid SQLite header")]
    InvalidSqliteFormat,
}

impl From<ValidationError> for ConversionError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileRequired => ConversionError::new(
                ErrorKind::FileRequired,
                "No file provided. Please upload a SQLite database file.",
            ),
            ValidationError::FileTooLarge { size, max } => ConversionError::new(
                ErrorKind::FileTooLarge,
                format!(
                    "File size exceeds maximum limit of {}MB.",
                    max as f64 / BYTES_PER_MB
                ),
            )
            .with_details(format!("File size: {:.2}MB", size as f64 / BYTES_PER_MB)),
            ValidationError::FileTooSmall { .. } => ConversionError::new(
                ErrorKind::FileTooSmall,
                "File is too small to be a valid SQLite database.",
            ),
            ValidationError::InvalidExtension { extension, allowed } => ConversionError::new(
                ErrorKind::InvalidExtension,
                format!("Invalid file extension. Allowed: {}", allowed.join(", ")),
            )
            .with_details(format!("Received: {}", extension)),
            ValidationError::InvalidSqliteFormat => ConversionError::new(
                ErrorKind::InvalidSqliteFormat,
                "File is not a valid SQLite database. Invalid file header.",
            ),
        }
    }
}

/// Upload validator
///
/// Runs the structural checks on an upload without touching the filesystem. Each check
/// is exposed on its own so boundaries can be exercised independently; [`validate_all`]
/// applies them in their fixed order and stops at the first failure.
///
/// [`validate_all`]: InputValidator::validate_all
#[derive(Clone, Debug)]
pub struct InputValidator {
    max_file_size: u64,
    min_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl InputValidator {
    pub fn new(max_file_size: u64, min_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            min_file_size,
            allowed_extensions,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(
            config.max_file_size,
            config.min_file_size,
            config.allowed_extensions.clone(),
        )
    }

    /// Validate that a payload is present
    pub fn validate_presence<'a>(&self, upload: &'a UploadedFile) -> Result<&'a Bytes, ValidationError> {
        upload.content.as_ref().ok_or(ValidationError::FileRequired)
    }

    /// Validate the declared size against both bounds (maximum first)
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        if size < self.min_file_size {
            return Err(ValidationError::FileTooSmall {
                size,
                min: self.min_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension. Names without any dot carry no extension and pass.
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let Some(extension) = file_extension(filename) else {
            return Ok(());
        };

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate the SQLite format 3 magic header
    pub fn validate_header(&self, content: &[u8]) -> Result<(), ValidationError> {
        match content.get(..SQLITE_MAGIC_HEADER.len()) {
            Some(header) if header == SQLITE_MAGIC_HEADER => Ok(()),
            _ => Err(ValidationError::InvalidSqliteFormat),
        }
    }

    /// Run every check in order and hand back the validated payload
    pub fn validate_all<'a>(&self, upload: &'a UploadedFile) -> Result<&'a Bytes, ValidationError> {
        let content = self.validate_presence(upload)?;
        self.validate_file_size(upload.declared_size)?;
        if let Some(name) = upload.name.as_deref() {
            self.validate_extension(name)?;
        }
        self.validate_header(content)?;
        Ok(content)
    }
}

/// Everything from the last dot to the end, lowercased (`"a.DB"` → `".db"`)
fn file_extension(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .map(|index| filename[index..].to_lowercase())
}
