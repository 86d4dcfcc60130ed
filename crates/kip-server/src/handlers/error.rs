//! Error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kip_core::ErrorResponse;
use std::fmt::Display;
use tracing::error;

/// A status code plus the JSON error body sent to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                message: message.map(str::to_string),
                exists: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>, message: Option<&str>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn not_found(error: impl Into<String>, message: Option<&str>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    /// Generic 500; the detail is only logged.
    pub fn internal(message: &str, detail: impl Display) -> Self {
        error!("{}: {}", message, detail);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Some(message),
        )
    }

    /// Student endpoints always answer `exists: false` on error.
    pub fn with_exists_flag(mut self) -> Self {
        self.body.exists = Some(false);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
