// ============================================================================
// RoadGuard API - Auth Handlers
// File: crates/roadguard-api/src/handlers/auth.rs
// ============================================================================
//! Authentication endpoints (login, register, reset-password, logout, session)

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use roadguard_core::messages;
use roadguard_core::services::{RegisterInput, UserInfo};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{AuthSession, FormPayload};
use crate::response::{ApiResponse, Empty};
use crate::state::{ApiSettings, AppState};

/// Login request payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register request payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Reset-password request payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserInfo,
}

/// `Set-Cookie` value carrying a session token.
pub(crate) fn session_cookie(settings: &ApiSettings, token: &str, max_age_seconds: i64) -> String {
    let secure = if settings.cookie_secure { "; Secure" } else { "" };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        settings.cookie_name, token, max_age_seconds, secure
    )
}

pub(crate) fn clear_session_cookie(settings: &ApiSettings) -> String {
    session_cookie(settings, "", 0)
}

pub(crate) fn with_cookie(mut response: Response, cookie: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Login handler - POST /backend/login
pub async fn login(
    State(state): State<AppState>,
    FormPayload(payload): FormPayload<LoginRequest>,
) -> Result<Response, ApiError> {
    let result = state.auth.login(&payload.username, &payload.password).await?;

    let cookie = session_cookie(
        &state.settings,
        &result.token,
        result.session.remaining_seconds(),
    );
    let body = ApiResponse::success_with_message(
        LoginResponse {
            user: result.user,
            token: result.token,
        },
        messages::LOGIN_SUCCESS,
    );
    Ok(with_cookie(body.into_response(), &cookie))
}

/// Register handler - POST /backend/register
pub async fn register(
    State(state): State<AppState>,
    FormPayload(payload): FormPayload<RegisterRequest>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .auth
        .register(RegisterInput {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            confirm_password: payload.confirm_password,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok(ApiResponse::message(messages::REGISTER_SUCCESS))
}

/// Reset-password handler - POST /backend/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    FormPayload(payload): FormPayload<ResetPasswordRequest>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .auth
        .reset_password(
            &payload.email,
            &payload.new_password,
            payload.confirm_password.as_deref(),
        )
        .await?;

    Ok(ApiResponse::message(messages::RESET_SUCCESS))
}

/// Logout handler - POST /backend/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    with_cookie(
        ApiResponse::message(messages::LOGOUT_SUCCESS).into_response(),
        &clear_session_cookie(&state.settings),
    )
}

/// Current session - GET /backend/session
pub async fn session(AuthSession(session): AuthSession) -> ApiResponse<SessionResponse> {
    ApiResponse::success(SessionResponse {
        user: UserInfo::from(&session),
    })
}
