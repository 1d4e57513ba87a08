// ============================================================================
// RoadGuard Core - Authentication Service
// File: crates/roadguard-core/src/services/auth_service.rs
// ============================================================================
//! Login, registration, password reset and session resolution

use std::sync::Arc;

use roadguard_security::{JwtError, JwtService, PasswordService, Session};
use roadguard_shared::utils::mask_email;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::messages;
use crate::repositories::UserRepository;

/// Authentication service for the dashboard operators
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError(messages::FILL_ALL_FIELDS.to_string()));
        }

        info!("Login attempt for username: {}", username);

        // 1. Find user by username
        let user = self.user_repo.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: unknown username: {}", username);
            DomainError::UserNotFound
        })?;

        // 2. Verify password
        let password_valid = match PasswordService::verify(password, &user.password) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored password for {} is not a readable hash: {}", username, e);
                false
            }
        };

        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue session token
        let (session, token) = self
            .jwt
            .issue_session(
                user.user_id,
                &user.username,
                user.first_name.as_deref(),
                user.last_name.as_deref(),
            )
            .map_err(|e| DomainError::SessionError(e.to_string()))?;

        info!("Login successful for: {} (session {})", username, session.id);

        Ok(LoginResult {
            user: UserInfo::from(&user),
            session,
            token,
        })
    }

    /// Register a new user
    pub async fn register(&self, input: RegisterInput) -> Result<UserInfo, DomainError> {
        let username = input.username.trim();
        let email = input.email.trim();

        if username.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(DomainError::ValidationError(
                messages::FILL_REQUIRED_FIELDS.to_string(),
            ));
        }

        if let Some(confirm) = &input.confirm_password {
            if *confirm != input.password {
                return Err(DomainError::ValidationError(
                    messages::PASSWORDS_DO_NOT_MATCH.to_string(),
                ));
            }
        }

        info!("Registration attempt for username: {}", username);

        let password_hash = PasswordService::hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // Uniqueness is enforced by the insert itself.
        let created = self
            .user_repo
            .create(&NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                first_name: non_blank(input.first_name),
                last_name: non_blank(input.last_name),
            })
            .await
            .map_err(|e| {
                if e.is_client_error() {
                    warn!("Registration rejected for {}: {}", username, e);
                }
                e
            })?;

        info!("Registration successful for: {} (id {})", username, created.user_id);
        Ok(UserInfo::from(&created))
    }

    /// Overwrite the password of the account registered with `email`.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        confirm_password: Option<&str>,
    ) -> Result<(), DomainError> {
        let email = email.trim();
        if email.is_empty() || new_password.is_empty() {
            return Err(DomainError::ValidationError(messages::FILL_ALL_FIELDS.to_string()));
        }

        if let Some(confirm) = confirm_password {
            if confirm != new_password {
                return Err(DomainError::ValidationError(
                    messages::PASSWORDS_DO_NOT_MATCH.to_string(),
                ));
            }
        }

        let password_hash = PasswordService::hash(new_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let updated = self
            .user_repo
            .update_password_by_email(email, &password_hash)
            .await?;

        if !updated {
            warn!("Password reset for unknown email: {}", mask_email(email));
            return Err(DomainError::EmailNotFound(email.to_string()));
        }

        info!("Password reset for: {}", mask_email(email));
        Ok(())
    }

    /// Validates a session token issued by [`AuthService::login`].
    pub fn resolve_session(&self, token: &str) -> Result<Session, DomainError> {
        self.jwt.validate_session(token).map_err(|e| match e {
            JwtError::TokenExpired => DomainError::SessionError("session expired".to_string()),
            other => DomainError::SessionError(other.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Input accepted by [`AuthService::register`]
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub session: Session,
    pub token: String,
}

/// User profile returned to the dashboard (`user` in the login envelope)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl From<&Session> for UserInfo {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id,
            username: session.username.clone(),
            first_name: session.first_name.clone(),
            last_name: session.last_name.clone(),
        }
    }
}
