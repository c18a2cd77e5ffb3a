use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::mime::guess_mime_type;
use crate::storage::FileRecord;

/// Body of a miss inside the site namespace.
pub const NOT_CACHED: &str = "Not cached";

/// Body of a malformed site path.
pub const BAD_REQUEST: &str = "Bad request";

// ============================================================================
// Site responses (plain text / raw bytes)
// ============================================================================

pub fn not_cached() -> Response {
    plain_text(StatusCode::NOT_FOUND, NOT_CACHED)
}

pub fn bad_request() -> Response {
    plain_text(StatusCode::BAD_REQUEST, BAD_REQUEST)
}

fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
        body,
    )
        .into_response()
}

/// Serve a stored file, or 404 when there is no record or no payload.
///
/// The stored MIME type wins; otherwise it is inferred from `path`.
pub fn file_response(record: Option<FileRecord>, path: &str) -> Response {
    let Some(FileRecord {
        blob: Some(blob),
        mime_type,
        ..
    }) = record
    else {
        return not_cached();
    };

    let content_type = mime_type
        .filter(|t| !t.is_empty())
        .and_then(|t| HeaderValue::from_str(&t).ok())
        .unwrap_or_else(|| HeaderValue::from_static(guess_mime_type(path)));
    let byte_size = blob.len() as u64;

    let mut response = (StatusCode::OK, blob).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(byte_size));

    response
}

// ============================================================================
// JSend envelopes (internal routes and faults)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JSendStatus {
    Error,
    Fail,
    Success,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JSend<T: Serialize> {
    pub data: T,
    pub status: JSendStatus,
}

impl<T: Serialize> JSend<T> {
    pub fn success(data: T) -> Json<JSend<T>> {
        Json(JSend {
            data,
            status: JSendStatus::Success,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JSendFail {
    pub data: FailData,
    pub status: JSendStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FailData {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JSendError {
    pub message: String,
    pub status: JSendStatus,
}

/// A JSend-compatible error that can be either a fail (4xx) or error (5xx).
#[derive(Debug)]
pub enum ApiError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fail(code, message) => (
                code,
                Json(JSendFail {
                    data: FailData { message },
                    status: JSendStatus::Fail,
                }),
            )
                .into_response(),
            ApiError::Error(code, message) => (
                code,
                Json(JSendError {
                    message,
                    status: JSendStatus::Error,
                }),
            )
                .into_response(),
        }
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::NOT_FOUND, message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}
