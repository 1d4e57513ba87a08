//! API Response wrapper
//!
//! Every JSON endpoint answers HTTP 200 with `{success, message?, ...payload}`;
//! the payload fields sit next to `success` rather than under a `data` key.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

/// Payload of envelopes that only carry a message.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn message(message: &str) -> Self {
        Self::success_with_message(Empty {}, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Empty {},
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
