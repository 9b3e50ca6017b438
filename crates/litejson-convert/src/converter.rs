//! Conversion pipeline: validate → stage → introspect → extract → assemble.

use litejson_core::{
    ConversionResult, ConverterConfig, ErrorMetadata, LogLevel, ResponseEnvelope, UploadedFile,
};
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use std::time::Instant;

use crate::error::ConvertError;
use crate::extract;
use crate::introspect;
use crate::staging::{StagedFile, StagingArea};
use crate::validator::InputValidator;

/// Converts uploaded SQLite databases into [`ResponseEnvelope`]s.
///
/// A converter holds no per-request state and can be shared across concurrent requests;
/// the staging directory is the only resource they have in common.
#[derive(Clone, Debug)]
pub struct Converter {
    config: ConverterConfig,
    validator: InputValidator,
    staging: StagingArea,
}

impl Converter {
    /// Converter staging into `config.staging_dir`
    pub fn new(config: ConverterConfig) -> Self {
        let staging = StagingArea::new(config.staging_dir.clone());
        Self::with_staging(config, staging)
    }

    pub fn with_staging(config: ConverterConfig, staging: StagingArea) -> Self {
        Self {
            validator: InputValidator::from_config(&config),
            config,
            staging,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Run the whole pipeline. Every failure is reported inside the envelope.
    pub async fn convert(&self, upload: UploadedFile) -> ResponseEnvelope {
        let started = Instant::now();
        let file_name = upload.display_name().to_string();

        tracing::info!(
            file_name = %file_name,
            file_size = upload.declared_size,
            "Conversion started"
        );

        match self.run(&upload).await {
            Ok(result) => {
                let (tables, total_rows) = (result.table_count(), result.total_rows());
                let envelope = ResponseEnvelope::success(result, started);
                tracing::info!(
                    file_name = %file_name,
                    tables,
                    total_rows,
                    processing_time_ms = envelope.meta().processing_time_ms,
                    "Conversion completed"
                );
                envelope
            }
            Err(err) => {
                let error = err.to_conversion_error();
                match error.log_level() {
                    LogLevel::Debug => {
                        tracing::debug!(file_name = %file_name, error = %err, code = %error.code, "Conversion rejected");
                    }
                    LogLevel::Warn => {
                        tracing::warn!(file_name = %file_name, error = %err, code = %error.code, "Conversion rejected");
                    }
                    LogLevel::Error => {
                        tracing::error!(file_name = %file_name, error = %err, code = %error.code, "Conversion failed");
                    }
                }
                ResponseEnvelope::failure(error, started)
            }
        }
    }

    async fn run(&self, upload: &UploadedFile) -> Result<ConversionResult, ConvertError> {
        let content = self.validator.validate_all(upload)?;

        let staged = self.staging.stage(content).await?;
        let outcome = self.convert_staged(&staged, upload).await;
        staged.remove().await;

        outcome
    }

    async fn convert_staged(
        &self,
        staged: &StagedFile,
        upload: &UploadedFile,
    ) -> Result<ConversionResult, ConvertError> {
        let mut conn = introspect::open_database(staged.path()).await?;
        let outcome = self.extract_all(&mut conn, upload).await;

        // The file is removed right after, so close before returning on every path
        if let Err(e) = conn.close().await {
            tracing::warn!(
                error = %e,
                path = %staged.path().display(),
                "Failed to close staged database"
            );
        }

        outcome
    }

    async fn extract_all(
        &self,
        conn: &mut SqliteConnection,
        upload: &UploadedFile,
    ) -> Result<ConversionResult, ConvertError> {
        let tables = introspect::list_user_tables(conn).await?;
        introspect::check_table_count(tables.len(), self.config.max_tables)?;

        let mut result = ConversionResult::new(upload.display_name(), upload.declared_size);
        for table in &tables {
            let extracted =
                extract::extract_table(conn, table, self.config.max_rows_per_table).await?;
            result.push_table(extracted.name, extracted.columns, extracted.rows);
        }

        Ok(result)
    }
}
