//! # RoadGuard Security
//! 
//! Security utilities: password hashing and signed session tokens.

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
pub use session::Session;
