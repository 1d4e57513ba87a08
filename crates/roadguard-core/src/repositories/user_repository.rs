//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Single INSERT; a unique violation surfaces as
    /// `UsernameAlreadyExists` or `EmailAlreadyExists`.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Returns `false` when no account has this email.
    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;
}
