//! Driver overview and detail queries

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use roadguard_shared::constants::RECENT_ROUTES_LIMIT;
use serde::Serialize;
use tracing::debug;

use crate::domain::{ActiveRoute, Driver, Route};
use crate::error::DomainError;
use crate::repositories::DriverRepository;

/// A driver card on the dashboard: the driver plus its current route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverOverview {
    #[serde(flatten)]
    pub driver: Driver,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<ActiveRoute>,
}

/// A driver with its latest routes of any state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: Driver,
    pub routes: Vec<Route>,
}

pub struct DriverService {
    driver_repo: Arc<dyn DriverRepository>,
}

impl DriverService {
    pub fn new(driver_repo: Arc<dyn DriverRepository>) -> Self {
        Self { driver_repo }
    }

    /// Every driver, each with its most recent in-progress route (timed at `now`).
    pub async fn list_drivers(&self, now: DateTime<Utc>) -> Result<Vec<DriverOverview>, DomainError> {
        let drivers = self.driver_repo.list_drivers().await?;
        let mut active = latest_per_driver(self.driver_repo.find_active_routes().await?);

        debug!(
            "Loaded {} drivers, {} with an active route",
            drivers.len(),
            active.len()
        );

        Ok(drivers
            .into_iter()
            .map(|driver| {
                let route = active
                    .remove(&driver.conductor_id)
                    .map(|route| route.into_active(now));
                DriverOverview { driver, route }
            })
            .collect())
    }

    pub async fn get_driver(&self, id: i32) -> Result<DriverDetail, DomainError> {
        let driver = self.find_driver(id).await?;
        let routes = self
            .driver_repo
            .find_recent_routes(id, RECENT_ROUTES_LIMIT)
            .await?;
        Ok(DriverDetail { driver, routes })
    }

    /// Ids below 1 never match a row and are rejected without a query.
    pub async fn find_driver(&self, id: i32) -> Result<Driver, DomainError> {
        if id <= 0 {
            return Err(DomainError::DriverNotFound(id));
        }
        self.driver_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::DriverNotFound(id))
    }
}

fn latest_per_driver(routes: Vec<Route>) -> HashMap<i32, Route> {
    let mut latest: HashMap<i32, Route> = HashMap::new();
    for route in routes.into_iter().filter(Route::is_in_progress) {
        match latest.get(&route.conductor_id) {
            Some(current) if current.fecha_inicio >= route.fecha_inicio => {}
            _ => {
                latest.insert(route.conductor_id, route);
            }
        }
    }
    latest
}
