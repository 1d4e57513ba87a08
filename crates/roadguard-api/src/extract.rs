//! Request extractors: form bodies, session resolution and query ids

use std::convert::Infallible;

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Query, Request},
    http::{header, request::Parts, HeaderMap},
    response::Redirect,
    Form, Json,
};
use roadguard_core::messages;
use roadguard_security::Session;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Body accepted as JSON, urlencoded or multipart form data.
///
/// A request without a content type yields `T::default()`, so missing
/// fields behave like empty ones.
pub struct FormPayload<T>(pub T);

impl<S, T> FromRequest<S> for FormPayload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let invalid = |reason: String| {
            debug!("Rejected request body: {}", reason);
            ApiError::Validation(messages::INVALID_REQUEST_BODY.to_string())
        };

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid(e.body_text()))?;
            Ok(FormPayload(value))
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| invalid(e.body_text()))?;

            let mut fields = Map::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| invalid(e.body_text()))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let text = field.text().await.map_err(|e| invalid(e.body_text()))?;
                fields.insert(name, Value::String(text));
            }

            serde_json::from_value(Value::Object(fields))
                .map(FormPayload)
                .map_err(|e| invalid(e.to_string()))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| invalid(e.body_text()))?;
            Ok(FormPayload(value))
        } else {
            Ok(FormPayload(T::default()))
        }
    }
}

/// Session token from the session cookie, falling back to a bearer token.
pub fn session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
    })
}

fn resolve_session(parts: &Parts, state: &AppState) -> Option<Session> {
    let token = session_token(&parts.headers, &state.settings.cookie_name)?;
    match state.auth.resolve_session(token) {
        Ok(session) => Some(session),
        Err(e) => {
            debug!("Ignoring session token: {}", e);
            None
        }
    }
}

/// Authenticated caller of a JSON endpoint.
pub struct AuthSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .map(AuthSession)
            .ok_or_else(|| ApiError::Unauthorized(messages::SESSION_INVALID.to_string()))
    }
}

/// Authenticated caller of a protected page; anonymous visitors are sent
/// to the login page.
pub struct PageSession(pub Session);

impl FromRequestParts<AppState> for PageSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .map(PageSession)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Optional session, for pages reachable by everyone.
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(resolve_session(parts, state)))
    }
}

/// `?id=` of the driver endpoints. Never rejects: an unparsable query
/// string counts as a missing id and a repeated `id` keeps the last value.
#[derive(Debug, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl<S> FromRequestParts<S> for IdQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                debug!("Ignoring query string: {}", e.body_text());
                Vec::new()
            }
        };
        Ok(IdQuery::from_pairs(pairs))
    }
}

impl IdQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .filter(|(name, _)| name == "id")
            .map(|(_, value)| value)
            .last();
        Self { id }
    }

    /// `None` when the parameter is missing or blank.
    pub fn driver_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(lenient_int)
    }
}

/// Leading integer of `raw` (after whitespace and an optional sign),
/// saturating at the `i32` bounds; 0 when there is none.
pub fn lenient_int(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX) + 1);
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
