// ============================================================================
// RoadGuard Core - Route Entity
// File: crates/roadguard-core/src/domain/route.rs
// Description: Driver trips between two cities and their live timing
// ============================================================================

use chrono::{DateTime, Utc};
use roadguard_shared::constants::ROUTE_STATUS_IN_PROGRESS;
use roadguard_shared::utils::sql_datetime;
use serde::{Deserialize, Serialize};

/// Route row joined with the origin and destination city names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub ruta_id: i32,
    pub conductor_id: i32,
    pub origen_id: i32,
    pub destino_id: i32,
    #[serde(with = "sql_datetime")]
    pub fecha_inicio: DateTime<Utc>,
    /// Estimated duration in minutes
    pub tiempo_estimado: i32,
    pub estado: String,
    pub distancia_km: f64,
    pub origen: String,
    pub destino: String,
}

impl Route {
    pub fn is_in_progress(&self) -> bool {
        self.estado == ROUTE_STATUS_IN_PROGRESS
    }

    pub fn timing_at(&self, now: DateTime<Utc>) -> RouteTiming {
        RouteTiming::compute(self.fecha_inicio, self.tiempo_estimado, now)
    }

    /// Attaches the elapsed/remaining labels computed at `now`.
    pub fn into_active(self, now: DateTime<Utc>) -> ActiveRoute {
        let timing = self.timing_at(now);
        ActiveRoute {
            route: self,
            tiempo_transcurrido: timing.elapsed_label(),
            tiempo_restante: timing.remaining_label(),
        }
    }
}

/// A driver's current "En Curso" route with derived timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRoute {
    #[serde(flatten)]
    pub route: Route,
    pub tiempo_transcurrido: String,
    pub tiempo_restante: String,
}

/// Whole-minute timing of a route. Both values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTiming {
    pub elapsed_minutes: i64,
    pub remaining_minutes: i64,
}

impl RouteTiming {
    /// A start in the future counts as zero elapsed time.
    pub fn compute(started_at: DateTime<Utc>, estimated_minutes: i32, now: DateTime<Utc>) -> Self {
        let elapsed_minutes = (now - started_at).num_minutes().max(0);
        let remaining_minutes = (i64::from(estimated_minutes) - elapsed_minutes).max(0);
        Self {
            elapsed_minutes,
            remaining_minutes,
        }
    }

    /// `"M minuto(s)"` under one hour, `"H hora(s) M minuto(s)"` otherwise.
    pub fn elapsed_label(&self) -> String {
        if self.elapsed_minutes >= 60 {
            format_hours_minutes(self.elapsed_minutes)
        } else {
            format!("{} minuto(s)", self.elapsed_minutes)
        }
    }

    pub fn remaining_label(&self) -> String {
        format_hours_minutes(self.remaining_minutes)
    }
}

fn format_hours_minutes(total_minutes: i64) -> String {
    format!(
        "{} hora(s) {} minuto(s)",
        total_minutes / 60,
        total_minutes % 60
    )
}
