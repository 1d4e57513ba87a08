//! Database module (PostgreSQL adapters)

pub mod bootstrap;
pub mod connection;
pub mod errors;
pub mod postgres;

pub use bootstrap::INIT_SCRIPT;
pub use connection::create_pool;
pub use postgres::{
    PgAlertRepository, PgDriverRepository, PgMaintenanceRepository, PgUserRepository,
};
