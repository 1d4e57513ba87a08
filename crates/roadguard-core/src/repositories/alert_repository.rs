//! Alert repository trait (port)

use async_trait::async_trait;
use crate::domain::Alert;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Alerts of one driver ordered by `fecha DESC`.
    async fn find_by_driver(&self, driver_id: i32) -> Result<Vec<Alert>, DomainError>;
}
