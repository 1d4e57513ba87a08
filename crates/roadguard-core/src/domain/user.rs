// ============================================================================
// RoadGuard Core - User Entity
// File: crates/roadguard-core/src/domain/user.rs
// Description: Dashboard operator account
// ============================================================================

use serde::Serialize;

/// Dashboard user. `password` holds an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Insert payload for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
