use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use roadguard_api::{build_router, ApiSettings, AppState, Repositories};
use roadguard_core::domain::StatementOutcome;
use roadguard_infrastructure::{
    create_pool, PgAlertRepository, PgDriverRepository, PgMaintenanceRepository,
    PgUserRepository, INIT_SCRIPT,
};
use roadguard_security::JwtService;
use roadguard_shared::config::AppConfig;
use roadguard_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    let _log_guard = init_telemetry(&config.log)?;

    info!(env = %config.app.env, "RoadGuard server starting...");

    if config.uses_default_session_secret() {
        if config.is_production() {
            anyhow::bail!("session.secret must be set in production (ROADGUARD__SESSION__SECRET)");
        }
        warn!("Using the built-in development session secret");
    }

    // Connect to Database
    let pool = create_pool(&config.database)
        .await
        .context("failed to create database pool")?;
    info!("Database pool ready.");

    let repos = Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        drivers: Arc::new(PgDriverRepository::new(pool.clone())),
        alerts: Arc::new(PgAlertRepository::new(pool.clone())),
        maintenance: Arc::new(PgMaintenanceRepository::new(pool)),
    };
    let jwt = Arc::new(JwtService::new(
        &config.session.secret,
        config.session.expiry_hours * 3600,
    ));
    let state = AppState::new(repos, jwt, ApiSettings::from_config(&config), INIT_SCRIPT)?;

    if config.database.run_init_script_on_startup {
        match state.bootstrap.run_script(INIT_SCRIPT).await {
            Ok(outcomes) => log_init_outcomes(&outcomes),
            Err(e) => error!("Init script could not run: {}", e),
        }
    }

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_init_outcomes(outcomes: &[StatementOutcome]) {
    for outcome in outcomes {
        match &outcome.message {
            Some(message) => warn!(query = %outcome.query, "Init statement failed: {}", message),
            None => info!(query = %outcome.query, "Init statement applied"),
        }
    }
}
