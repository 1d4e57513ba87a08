//! HTTP handlers

pub mod alerts;
pub mod auth;
pub mod bootstrap;
pub mod drivers;
pub mod health;
pub mod pages;

use crate::error::ApiError;

/// Fallback for write endpoints hit with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
