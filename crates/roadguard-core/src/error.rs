//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("No account for email: {0}")]
    EmailNotFound(String),

    #[error("Driver not found: {0}")]
    DriverNotFound(i32),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Client-caused failures, logged at `warn` rather than `error`.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationError(_)
                | DomainError::UserNotFound
                | DomainError::InvalidCredentials
                | DomainError::UsernameAlreadyExists(_)
                | DomainError::EmailAlreadyExists(_)
                | DomainError::EmailNotFound(_)
                | DomainError::DriverNotFound(_)
                | DomainError::SessionError(_)
        )
    }
}
