//! Request extractors whose rejections are [`AppError`]s.
//!
//! axum's own `Json` and `Path` reject with plain-text parser output and
//! 415 on a missing content type. These wrappers keep every failure on the
//! structured `{"error": ...}` shape.

use crate::types::AppError;
use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Fixed message for a body that is missing, not JSON or unreadable.
pub const INVALID_BODY: &str = "Request body must be a valid JSON object";
/// Fixed message for a path segment that does not parse.
pub const INVALID_PATH: &str = "\"id\" must be an integer";

/// JSON body extractor and response wrapper.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        AppError::Validation(INVALID_BODY.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "rejected path parameter");
        AppError::Validation(INVALID_PATH.to_string())
    }
}
