//! API error responses.
//!
//! A no-match lookup is an empty success, never an error; this type is for
//! bad requests, missing entities, and upstream fetch failures that left us
//! with no snapshot to serve.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use crate::soc::SocApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    BadRequest,
    NotFound,
    UpstreamUnavailable,
    InternalError,
}

impl ApiErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ApiErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::BadRequest, message)
    }

    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::new(ApiErrorCode::NotFound, format!("{entity} not found: {key}"))
    }
}

impl From<SocApiError> for ApiError {
    fn from(e: SocApiError) -> Self {
        tracing::error!(error = %e, "upstream fetch failed with no cached snapshot");
        Self::new(
            ApiErrorCode::UpstreamUnavailable,
            "Failed to fetch course data",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "error",
            "code": self.code,
            "message": self.message,
        });
        (self.code.status(), Json(body)).into_response()
    }
}
