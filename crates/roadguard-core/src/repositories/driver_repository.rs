//! Driver and route repository trait (port)

use async_trait::async_trait;
use crate::domain::{Driver, Route};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// All drivers ordered by `estado DESC, first_name ASC`.
    async fn list_drivers(&self) -> Result<Vec<Driver>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, DomainError>;

    /// The most recent "En Curso" route of every driver that has one.
    async fn find_active_routes(&self) -> Result<Vec<Route>, DomainError>;

    /// Latest routes of any state, newest first.
    async fn find_recent_routes(&self, driver_id: i32, limit: i64) -> Result<Vec<Route>, DomainError>;
}
