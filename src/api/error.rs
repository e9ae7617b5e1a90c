//! HTTP error responses.
//!
//! Every failure leaves the router as a JSON body of the form
//! `{"code": "...", "message": "..."}`. Server-side failures are logged with
//! their full cause and answered with a generic message.

use crate::board::{
    domain::{BoardDomainError, BoardErrorKind},
    ports::BoardRepositoryError,
    services::BoardServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable error code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Builds a `400 Bad Request` error for malformed request input.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "validation",
            message: message.into(),
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        let (status, code) = match (&err, err.kind()) {
            (BoardServiceError::Domain(BoardDomainError::DuplicateMember(_)), _) => {
                (StatusCode::BAD_REQUEST, "already_member")
            }
            (
                BoardServiceError::Repository(BoardRepositoryError::VersionConflict { .. }),
                _,
            ) => (StatusCode::CONFLICT, "stale_version"),
            (_, BoardErrorKind::Validation) => (StatusCode::BAD_REQUEST, "validation"),
            (_, BoardErrorKind::NotFound) => (StatusCode::NOT_FOUND, "not_found"),
            (_, BoardErrorKind::Conflict) => (StatusCode::CONFLICT, "conflict"),
            (_, BoardErrorKind::Timeout) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            (_, BoardErrorKind::Storage) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "request failed");
            "internal server error".to_owned()
        } else if status.is_server_error() {
            tracing::warn!(error = %err, "request timed out");
            err.to_string()
        } else {
            tracing::debug!(error = %err, "request rejected");
            err.to_string()
        };

        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
