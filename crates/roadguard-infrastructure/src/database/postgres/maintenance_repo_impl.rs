// ============================================================================
// RoadGuard Infrastructure - PostgreSQL Maintenance Repository
// File: crates/roadguard-infrastructure/src/database/postgres/maintenance_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use roadguard_core::domain::StatementOutcome;
use roadguard_core::error::DomainError;
use roadguard_core::repositories::MaintenanceRepository;

use crate::database::errors::to_domain_error;

pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| to_domain_error("pinging database", e))?;
        Ok(())
    }

    async fn execute_statements(
        &self,
        statements: &[String],
    ) -> Result<Vec<StatementOutcome>, DomainError> {
        // An unreachable database aborts the run instead of failing every statement.
        drop(
            self.pool
                .acquire()
                .await
                .map_err(|e| DomainError::ConnectionError(e.to_string()))?,
        );

        let mut outcomes = Vec::with_capacity(statements.len());
        for statement in statements {
            match sqlx::raw_sql(statement).execute(&self.pool).await {
                Ok(result) => {
                    debug!("Statement ok ({} rows)", result.rows_affected());
                    outcomes.push(StatementOutcome::success(statement));
                }
                Err(e) => {
                    warn!("Statement failed: {}", e);
                    outcomes.push(StatementOutcome::error(statement, e.to_string()));
                }
            }
        }
        Ok(outcomes)
    }
}
