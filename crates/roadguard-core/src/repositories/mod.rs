//! Repository traits (ports)

pub mod user_repository;
pub mod driver_repository;
pub mod alert_repository;
pub mod maintenance_repository;

pub use user_repository::UserRepository;
pub use driver_repository::DriverRepository;
pub use alert_repository::AlertRepository;
pub use maintenance_repository::MaintenanceRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use driver_repository::MockDriverRepository;
#[cfg(test)]
pub use alert_repository::MockAlertRepository;
#[cfg(test)]
pub use maintenance_repository::MockMaintenanceRepository;
