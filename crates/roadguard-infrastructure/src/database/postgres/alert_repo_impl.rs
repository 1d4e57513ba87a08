// ============================================================================
// RoadGuard Infrastructure - PostgreSQL Alert Repository
// File: crates/roadguard-infrastructure/src/database/postgres/alert_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use roadguard_core::domain::Alert;
use roadguard_core::error::DomainError;
use roadguard_core::repositories::AlertRepository;

use crate::database::errors::to_domain_error;

pub struct PgAlertRepository {
    pool: PgPool,
}

impl PgAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AlertRow {
    alerta_id: i32,
    conductor_id: i32,
    tipo: String,
    descripcion: String,
    fecha: DateTime<Utc>,
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Alert {
            alerta_id: row.alerta_id,
            conductor_id: row.conductor_id,
            tipo: row.tipo,
            descripcion: row.descripcion,
            fecha: row.fecha,
        }
    }
}

#[async_trait]
impl AlertRepository for PgAlertRepository {
    async fn find_by_driver(&self, driver_id: i32) -> Result<Vec<Alert>, DomainError> {
        let rows: Vec<AlertRow> = sqlx::query_as(
            r#"
            SELECT alerta_id, conductor_id, tipo, descripcion, fecha
            FROM alertas
            WHERE conductor_id = $1
            ORDER BY fecha DESC
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| to_domain_error("loading driver alerts", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
