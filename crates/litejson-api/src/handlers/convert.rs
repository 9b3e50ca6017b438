//! `POST /convert`: read the `file` multipart field and run it through the converter.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
};
use bytes::Bytes;
use litejson_convert::ValidationError;
use litejson_core::{ConversionError, ResponseEnvelope, UploadedFile};
use std::sync::Arc;
use std::time::Instant;

use crate::error::EnvelopeResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

pub async fn convert_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> EnvelopeResponse {
    let started = Instant::now();

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected non-multipart upload");
            let error = file_required().with_details(rejection.body_text());
            return ResponseEnvelope::failure(error, started).into();
        }
    };

    let upload = match read_file_field(multipart).await {
        Ok(upload) => upload,
        Err(err) => {
            let error = multipart_error(&state, &headers, &err);
            tracing::debug!(error = %err, code = %error.code, "Failed to read multipart upload");
            return ResponseEnvelope::failure(error, started).into();
        }
    };

    state.converter.convert(upload).await.into()
}

/// Pull the first `file` part out of the form. A part without a filename is a plain form
/// value, not a file, and is skipped like any other field.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content: Bytes = field.bytes().await?;
        return Ok(UploadedFile {
            declared_size: content.len() as u64,
            content: Some(content),
            name: Some(name),
        });
    }

    Ok(UploadedFile::missing())
}

fn multipart_error(state: &AppState, headers: &HeaderMap, err: &MultipartError) -> ConversionError {
    if err.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return file_required().with_details(err.body_text());
    }

    let max = state.converter.config().max_file_size;
    let size = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    match size {
        Some(size) => ConversionError::from(ValidationError::FileTooLarge { size, max }),
        None => ConversionError {
            details: None,
            ..ConversionError::from(ValidationError::FileTooLarge { size: max, max })
        },
    }
}

fn file_required() -> ConversionError {
    ConversionError::from(ValidationError::FileRequired)
}
