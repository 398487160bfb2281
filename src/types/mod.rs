use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::ValidationError;

// ============= Authentication Types =============

/// Credentials posted to the login endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Result of `GET /api/v1/auth/validate`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidity {
    pub is_valid: bool,
}

/// Body of `PATCH /api/v1/user/password/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordChange {
    pub password: String,
    pub new_password: String,
}

/// JSON error body carrying a `message` key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// JSON error body carrying an `error` key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request payload broke a schema rule; carries the first violation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client error reported under a `message` key.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown e-mail or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.message().to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(error) => {
                (StatusCode::BAD_REQUEST, axum::Json(ErrorBody { error })).into_response()
            }
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, axum::Json(MessageBody { message })).into_response()
            }
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                axum::Json(MessageBody {
                    message: "invalid data".to_string(),
                }),
            )
                .into_response(),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
