use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::time::Instant;

use super::conversion::ConversionResult;
use crate::error::ConversionError;

/// Timing metadata attached to every response
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// RFC 3339, UTC, millisecond precision
    pub timestamp: String,
    pub processing_time_ms: u64,
}

impl ResponseMeta {
    fn since(started: Instant) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Response wrapper carrying either a result or a classified error, never both
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    success: bool,
    data: Option<ConversionResult>,
    error: Option<ConversionError>,
    meta: ResponseMeta,
}

impl ResponseEnvelope {
    pub fn success(result: ConversionResult, started: Instant) -> Self {
        Self {
            success: true,
            data: Some(result),
            error: None,
            meta: ResponseMeta::since(started),
        }
    }

    pub fn failure(error: ConversionError, started: Instant) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            meta: ResponseMeta::since(started),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&ConversionResult> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ConversionError> {
        self.error.as_ref()
    }

    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }
}
