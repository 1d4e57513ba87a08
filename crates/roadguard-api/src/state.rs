use std::sync::Arc;

use chrono::FixedOffset;
use roadguard_core::repositories::{
    AlertRepository, DriverRepository, MaintenanceRepository, UserRepository,
};
use roadguard_core::services::{AlertService, AuthService, BootstrapService, DriverService};
use roadguard_security::JwtService;
use roadguard_shared::config::AppConfig;

use crate::views::{ViewError, Views};

/// Repository adapters the services are wired onto.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub alerts: Arc<dyn AlertRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
}

/// HTTP-facing settings taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub allow_init_script: bool,
    pub static_dir: String,
    /// Offset for dates rendered on pages. The JSON API stays in UTC.
    pub display_offset: FixedOffset,
}

impl ApiSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            cookie_secure: config.session.cookie_secure,
            allow_init_script: config.database.allow_init_script,
            static_dir: config.app.static_dir.clone(),
            display_offset: config.app.display_offset(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub drivers: Arc<DriverService>,
    pub alerts: Arc<AlertService>,
    pub bootstrap: Arc<BootstrapService>,
    pub views: Arc<Views>,
    pub settings: Arc<ApiSettings>,
    /// SQL run by `/backend/execute-sql`
    pub init_script: &'static str,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        jwt: Arc<JwtService>,
        settings: ApiSettings,
        init_script: &'static str,
    ) -> Result<Self, ViewError> {
        let drivers = Arc::new(DriverService::new(repos.drivers));
        Ok(Self {
            auth: Arc::new(AuthService::new(repos.users, jwt)),
            alerts: Arc::new(AlertService::new(
                repos.alerts,
                drivers.clone(),
                settings.display_offset,
            )),
            drivers,
            bootstrap: Arc::new(BootstrapService::new(repos.maintenance)),
            views: Arc::new(Views::new()?),
            settings: Arc::new(settings),
            init_script,
        })
    }
}
