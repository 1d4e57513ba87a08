//! # RoadGuard API
//! 
//! HTTP handlers, server-rendered pages, extractors and the JSON envelope.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use router::build_router;
pub use state::{ApiSettings, AppState, Repositories};
