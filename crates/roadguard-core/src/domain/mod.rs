//! # RoadGuard Core - Domain Module
//! 
//! Domain entities for the fleet dashboard.

pub mod user;
pub mod driver;
pub mod route;
pub mod alert;
pub mod bootstrap;

// Re-export all entities and enums
pub use user::{NewUser, User};
pub use driver::Driver;
pub use route::{ActiveRoute, Route, RouteTiming};
pub use alert::{Alert, AlertChart, AlertKind};
pub use bootstrap::{split_sql_script, StatementOutcome, StatementStatus};
