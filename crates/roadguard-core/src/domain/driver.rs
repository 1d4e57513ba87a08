// ============================================================================
// RoadGuard Core - Driver Entity
// File: crates/roadguard-core/src/domain/driver.rs
// Description: Bus driver (conductor) tracked by the dashboard
// ============================================================================

use roadguard_shared::constants::{DRIVER_STATUS_ON_ROUTE, DRIVING_STYLE_NORMAL};
use serde::{Deserialize, Serialize};

/// Driver row as exposed by the API. Field names follow the `conductores`
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub conductor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub bus_asignado: String,
    pub placa: String,
    pub estado: String,
    pub estilo_conduccion: String,
    pub imagen_url: Option<String>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_on_route(&self) -> bool {
        self.estado == DRIVER_STATUS_ON_ROUTE
    }

    /// Any style other than "Normal" is treated as dangerous.
    pub fn drives_normally(&self) -> bool {
        self.estilo_conduccion == DRIVING_STYLE_NORMAL
    }
}
