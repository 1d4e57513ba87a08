//! # RoadGuard Core
//! 
//! Domain entities, services, and repository traits for the RoadGuard dashboard.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod messages;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
