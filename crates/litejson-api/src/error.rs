//! HTTP response conversion for conversion envelopes
//!
//! Every `/convert` response, success or failure, carries a `ResponseEnvelope` body. The
//! status code is taken from the error kind's metadata.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use litejson_core::{ErrorMetadata, ResponseEnvelope};

/// Wrapper so `ResponseEnvelope` (defined in litejson-core) can implement `IntoResponse`
#[derive(Debug)]
pub struct EnvelopeResponse(pub ResponseEnvelope);

impl EnvelopeResponse {
    pub fn status(&self) -> StatusCode {
        match self.0.error() {
            Some(error) => StatusCode::from_u16(error.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            None => StatusCode::OK,
        }
    }
}

impl From<ResponseEnvelope> for EnvelopeResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        EnvelopeResponse(envelope)
    }
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litejson_core::{ConversionError, ConversionResult, ErrorKind};
    use std::time::Instant;

    fn failure(kind: ErrorKind) -> EnvelopeResponse {
        ResponseEnvelope::failure(ConversionError::new(kind, "failed"), Instant::now()).into()
    }

    #[test]
    fn test_status_follows_error_kind() {
        assert_eq!(failure(ErrorKind::FileRequired).status(), StatusCode::BAD_REQUEST);
        assert_eq!(failure(ErrorKind::InvalidSqliteFormat).status(), StatusCode::BAD_REQUEST);
        assert_eq!(failure(ErrorKind::FileTooLarge).status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            failure(ErrorKind::TooManyTables).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            failure(ErrorKind::DatabaseError).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_is_ok() {
        let envelope =
            ResponseEnvelope::success(ConversionResult::new("a.db", 4096), Instant::now());
        assert_eq!(EnvelopeResponse(envelope).status(), StatusCode::OK);
    }
}
