//! # RoadGuard Shared
//! 
//! Shared utilities, constants and telemetry for the RoadGuard application.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
