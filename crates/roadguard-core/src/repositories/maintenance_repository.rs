//! Database maintenance port (health check and init script)

use async_trait::async_trait;
use crate::domain::StatementOutcome;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;

    /// Runs each statement on its own; a failing statement does not stop the
    /// rest. `Err` means no connection could be obtained at all.
    async fn execute_statements(
        &self,
        statements: &[String],
    ) -> Result<Vec<StatementOutcome>, DomainError>;
}
