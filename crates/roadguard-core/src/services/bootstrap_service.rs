//! Database init script runner and readiness check

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{split_sql_script, StatementOutcome};
use crate::error::DomainError;
use crate::repositories::MaintenanceRepository;

pub struct BootstrapService {
    maintenance_repo: Arc<dyn MaintenanceRepository>,
}

impl BootstrapService {
    pub fn new(maintenance_repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self { maintenance_repo }
    }

    /// Runs every statement of `script` in order and reports each one.
    pub async fn run_script(&self, script: &str) -> Result<Vec<StatementOutcome>, DomainError> {
        let statements = split_sql_script(script);
        info!("Executing init script ({} statements)", statements.len());

        let outcomes = self.maintenance_repo.execute_statements(&statements).await?;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            warn!("Init script finished with {} failed statement(s)", failed);
        } else {
            info!("Init script finished without errors");
        }
        Ok(outcomes)
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.maintenance_repo.ping().await
    }
}
