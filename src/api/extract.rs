//! Extractors whose rejections are reported as [`ApiError`] bodies.
//!
//! axum answers a malformed body or path with a plain-text rejection. These
//! wrappers route those rejections through [`ApiError`] so every failure
//! keeps the `{code, message}` shape.

use super::error::ApiError;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path,
        rejection::{JsonRejection, PathRejection},
    },
};

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "request body rejected");
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "request path rejected");
        Self::bad_request(rejection.body_text())
    }
}
