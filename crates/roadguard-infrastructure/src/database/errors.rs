//! sqlx error translation

use roadguard_core::DomainError;
use tracing::error;

/// Pool and transport failures become `ConnectionError`, everything else
/// `DatabaseError` carrying the driver message.
pub(crate) fn to_domain_error(operation: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", operation, e);
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DomainError::ConnectionError(e.to_string()),
        other => DomainError::DatabaseError(other.to_string()),
    }
}
