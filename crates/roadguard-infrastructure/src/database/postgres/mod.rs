//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod driver_repo_impl;
pub mod alert_repo_impl;
pub mod maintenance_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use driver_repo_impl::PgDriverRepository;
pub use alert_repo_impl::PgAlertRepository;
pub use maintenance_repo_impl::PgMaintenanceRepository;
