// ============================================================================
// RoadGuard Infrastructure - PostgreSQL User Repository
// File: crates/roadguard-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use roadguard_core::domain::{NewUser, User};
use roadguard_core::error::DomainError;
use roadguard_core::repositories::UserRepository;

use crate::database::errors::to_domain_error;

const USERNAME_UNIQUE: &str = "users_username_key";
const EMAIL_UNIQUE: &str = "users_email_key";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    user_id: i32,
    username: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            username: row.username,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}

/// Conflict variant for a unique violation on `users`. Falls back to the
/// driver message when the constraint name is missing.
fn duplicate_user_error(constraint: Option<&str>, message: &str, user: &NewUser) -> DomainError {
    match constraint {
        Some(EMAIL_UNIQUE) => DomainError::EmailAlreadyExists(user.email.clone()),
        Some(USERNAME_UNIQUE) => DomainError::UsernameAlreadyExists(user.username.clone()),
        _ if message.contains("email") => DomainError::EmailAlreadyExists(user.email.clone()),
        _ => DomainError::UsernameAlreadyExists(user.username.clone()),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, username, password, first_name, last_name, email
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| to_domain_error("finding user by username", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        info!("Creating user: {}", user.username);

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, username, password, first_name, last_name, email
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    warn!("Duplicate user rejected: {}", db_err.message());
                    return duplicate_user_error(db_err.constraint(), db_err.message(), user);
                }
            }
            to_domain_error("creating user", e)
        })?;

        info!("User created successfully: {}", row.user_id);
        Ok(row.into())
    }

    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| to_domain_error("updating password", e))?;

        Ok(result.rows_affected() > 0)
    }
}
