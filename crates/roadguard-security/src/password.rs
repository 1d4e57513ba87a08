//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Could not hash password: {0}")]
    Hashing(String),
    /// The stored value is not a PHC string (e.g. a legacy plaintext row).
    #[error("Stored password is not a valid hash: {0}")]
    UnreadableHash(String),
}

/// Argon2id with the crate's default parameters.
pub struct PasswordService;

impl PasswordService {
    /// PHC string with a fresh random salt.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only when `stored` cannot be parsed.
    pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
        let stored = PasswordHash::new(stored)
            .map_err(|e| PasswordError::UnreadableHash(e.to_string()))?;
        let matches = Argon2::default()
            .verify_password(password.as_bytes(), &stored)
            .is_ok();
        Ok(matches)
    }
}
