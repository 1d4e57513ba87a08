//! Authenticated session carried by the session token

use chrono::Utc;
use uuid::Uuid;

/// Identity of a logged-in dashboard user, rebuilt from a validated token on
/// every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Session {
    pub fn new(
        user_id: i32,
        username: String,
        first_name: Option<String>,
        last_name: Option<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4(),
            user_id,
            username,
            first_name,
            last_name,
            issued_at: now,
            expires_at: now + ttl_seconds,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }

    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now().timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_expires_after_ttl() {
        let session = Session::new(7, "jperez".into(), None, None, 3600);
        assert!(!session.is_expired());
        assert_eq!(session.expires_at - session.issued_at, 3600);
        assert!(session.remaining_seconds() <= 3600);
    }

    #[test]
    fn zero_ttl_is_already_expired() {
        let session = Session::new(7, "jperez".into(), None, None, 0);
        assert!(session.is_expired());
        assert_eq!(session.remaining_seconds(), 0);
    }
}
