use axum::response::{IntoResponse, Response};
use roadguard_core::{messages, DomainError};
use thiserror::Error;

use crate::response::ApiResponse;

/// Failures of the JSON endpoints. All of them render as HTTP 200 with
/// `{success: false, message}`, the contract of the dashboard frontend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{}", messages::METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    #[error("{0}")]
    Disabled(String),

    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a domain error, prefixing database failures with `context`
    /// (e.g. "Error al obtener los conductores").
    pub fn from_domain(error: DomainError, context: &str) -> Self {
        match error {
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::UserNotFound => ApiError::NotFound(messages::USER_NOT_FOUND.to_string()),
            DomainError::InvalidCredentials => {
                ApiError::Unauthorized(messages::WRONG_PASSWORD.to_string())
            }
            DomainError::UsernameAlreadyExists(_) => {
                ApiError::Conflict(messages::USERNAME_TAKEN.to_string())
            }
            DomainError::EmailAlreadyExists(_) => {
                ApiError::Conflict(messages::EMAIL_TAKEN.to_string())
            }
            DomainError::EmailNotFound(_) => {
                ApiError::NotFound(messages::EMAIL_NOT_FOUND.to_string())
            }
            DomainError::DriverNotFound(_) => {
                ApiError::NotFound(messages::DRIVER_NOT_FOUND.to_string())
            }
            DomainError::SessionError(_) => {
                ApiError::Unauthorized(messages::SESSION_INVALID.to_string())
            }
            DomainError::ConnectionError(detail) => {
                ApiError::Connection(format!("{}: {}", messages::CTX_CONNECTION, detail))
            }
            DomainError::DatabaseError(detail) => {
                ApiError::Database(format!("{}: {}", context, detail))
            }
            DomainError::PasswordHashError(detail) | DomainError::InternalError(detail) => {
                tracing::error!("Internal failure: {}", detail);
                ApiError::Internal(messages::INTERNAL_ERROR.to_string())
            }
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::from_domain(error, messages::CTX_DATABASE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(msg) => tracing::warn!("Validation failed: {}", msg),
            ApiError::NotFound(msg) => tracing::warn!("Not found: {}", msg),
            ApiError::Conflict(msg) => tracing::warn!("Conflict: {}", msg),
            ApiError::Unauthorized(msg) => tracing::warn!("Unauthorized: {}", msg),
            ApiError::MethodNotAllowed => tracing::warn!("Method not allowed"),
            ApiError::Disabled(msg) => tracing::warn!("Disabled: {}", msg),
            ApiError::Connection(msg) => tracing::error!("Connection error: {}", msg),
            ApiError::Database(msg) => tracing::error!("Database error: {}", msg),
            ApiError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        ApiResponse::error(self.message()).into_response()
    }
}
