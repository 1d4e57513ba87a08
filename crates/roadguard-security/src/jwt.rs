//! Session token handling (HS256 JWT)

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use roadguard_shared::constants::TOKEN_TYPE_SESSION;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::session::Session;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub sid: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_expiry_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry: session_expiry_seconds,
        }
    }

    /// Opens a new session for the user and returns it with its signed token.
    pub fn issue_session(
        &self,
        user_id: i32,
        username: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(Session, String), JwtError> {
        let session = Session::new(
            user_id,
            username.to_string(),
            first_name.map(str::to_string),
            last_name.map(str::to_string),
            self.session_expiry,
        );
        let token = self.encode_session(&session)?;
        Ok((session, token))
    }

    pub fn encode_session(&self, session: &Session) -> Result<String, JwtError> {
        let claims = Claims {
            sub: session.user_id.to_string(),
            sid: session.id.to_string(),
            username: session.username.clone(),
            first_name: session.first_name.clone(),
            last_name: session.last_name.clone(),
            iat: session.issued_at,
            exp: session.expires_at,
            token_type: TOKEN_TYPE_SESSION.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_session(&self, token: &str) -> Result<Session, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })?;

        if claims.token_type != TOKEN_TYPE_SESSION {
            return Err(JwtError::ValidationError(format!(
                "unexpected token type: {}",
                claims.token_type
            )));
        }

        let user_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| JwtError::ValidationError("subject is not a user id".to_string()))?;
        let id = Uuid::parse_str(&claims.sid)
            .map_err(|_| JwtError::ValidationError("malformed session id".to_string()))?;

        let session = Session {
            id,
            user_id,
            username: claims.username,
            first_name: claims.first_name,
            last_name: claims.last_name,
            issued_at: claims.iat,
            expires_at: claims.exp,
        };

        // `Validation` tolerates a short leeway past `exp`; sessions do not.
        if session.is_expired() {
            return Err(JwtError::TokenExpired);
        }
        Ok(session)
    }
}
