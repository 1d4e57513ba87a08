//! Domain services (business logic)

pub mod auth_service;
pub mod driver_service;
pub mod alert_service;
pub mod bootstrap_service;

pub use auth_service::{AuthService, LoginResult, RegisterInput, UserInfo};
pub use driver_service::{DriverDetail, DriverOverview, DriverService};
pub use alert_service::{AlertService, DriverReport};
pub use bootstrap_service::BootstrapService;
