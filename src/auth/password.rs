//! Password hashing with Argon2.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::{ServiceError, ServiceResult};

/// Hashes a password with a fresh random salt.
///
/// The result is a PHC string that embeds the algorithm parameters and salt.
///
/// # Examples
///
/// ```
/// use expense_engine::auth::{hash_password, verify_password};
///
/// let hash = hash_password("testpassword").unwrap();
/// assert!(verify_password("testpassword", &hash));
/// assert!(!verify_password("wrong", &hash));
/// ```
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Credential {
            message: e.to_string(),
        })
}

/// Returns true if `password` matches the stored PHC hash.
///
/// A hash that cannot be parsed never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
