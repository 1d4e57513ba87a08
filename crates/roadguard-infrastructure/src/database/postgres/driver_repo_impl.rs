// ============================================================================
// RoadGuard Infrastructure - PostgreSQL Driver Repository
// File: crates/roadguard-infrastructure/src/database/postgres/driver_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use roadguard_core::domain::{Driver, Route};
use roadguard_core::error::DomainError;
use roadguard_core::repositories::DriverRepository;
use roadguard_shared::constants::ROUTE_STATUS_IN_PROGRESS;

use crate::database::errors::to_domain_error;

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DriverRow {
    conductor_id: i32,
    first_name: String,
    last_name: String,
    age: i32,
    bus_asignado: String,
    placa: String,
    estado: String,
    estilo_conduccion: String,
    imagen_url: Option<String>,
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Driver {
            conductor_id: row.conductor_id,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            bus_asignado: row.bus_asignado,
            placa: row.placa,
            estado: row.estado,
            estilo_conduccion: row.estilo_conduccion,
            imagen_url: row.imagen_url,
        }
    }
}

#[derive(Debug, FromRow)]
struct RouteRow {
    ruta_id: i32,
    conductor_id: i32,
    origen_id: i32,
    destino_id: i32,
    fecha_inicio: DateTime<Utc>,
    tiempo_estimado: i32,
    estado: String,
    distancia_km: f64,
    origen: String,
    destino: String,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            ruta_id: row.ruta_id,
            conductor_id: row.conductor_id,
            origen_id: row.origen_id,
            destino_id: row.destino_id,
            fecha_inicio: row.fecha_inicio,
            tiempo_estimado: row.tiempo_estimado,
            estado: row.estado,
            distancia_km: row.distancia_km,
            origen: row.origen,
            destino: row.destino,
        }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn list_drivers(&self) -> Result<Vec<Driver>, DomainError> {
        let rows: Vec<DriverRow> = sqlx::query_as(
            r#"
            SELECT conductor_id, first_name, last_name, age, bus_asignado,
                   placa, estado, estilo_conduccion, imagen_url
            FROM conductores
            ORDER BY estado DESC, first_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| to_domain_error("listing drivers", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, DomainError> {
        let row: Option<DriverRow> = sqlx::query_as(
            r#"
            SELECT conductor_id, first_name, last_name, age, bus_asignado,
                   placa, estado, estilo_conduccion, imagen_url
            FROM conductores
            WHERE conductor_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| to_domain_error("finding driver by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_active_routes(&self) -> Result<Vec<Route>, DomainError> {
        let rows: Vec<RouteRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT ON (r.conductor_id)
                   r.ruta_id, r.conductor_id, r.origen_id, r.destino_id,
                   r.fecha_inicio, r.tiempo_estimado, r.estado, r.distancia_km,
                   o.nombre AS origen, d.nombre AS destino
            FROM rutas r
            JOIN ciudades o ON r.origen_id = o.ciudad_id
            JOIN ciudades d ON r.destino_id = d.ciudad_id
            WHERE r.estado = $1
            ORDER BY r.conductor_id, r.fecha_inicio DESC
            "#,
        )
        .bind(ROUTE_STATUS_IN_PROGRESS)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| to_domain_error("loading active routes", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_recent_routes(&self, driver_id: i32, limit: i64) -> Result<Vec<Route>, DomainError> {
        let rows: Vec<RouteRow> = sqlx::query_as(
            r#"
            SELECT r.ruta_id, r.conductor_id, r.origen_id, r.destino_id,
                   r.fecha_inicio, r.tiempo_estimado, r.estado, r.distancia_km,
                   o.nombre AS origen, d.nombre AS destino
            FROM rutas r
            JOIN ciudades o ON r.origen_id = o.ciudad_id
            JOIN ciudades d ON r.destino_id = d.ciudad_id
            WHERE r.conductor_id = $1
            ORDER BY r.fecha_inicio DESC
            LIMIT $2
            "#,
        )
        .bind(driver_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| to_domain_error("loading recent routes", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
