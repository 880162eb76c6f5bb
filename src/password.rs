//! Password hashing and verification (argon2id).
//!
//! [`hash_password`] generates a random salt via `OsRng` and hashes the
//! plaintext with the default Argon2id parameters, returning a PHC-format
//! string (`$argon2id$v=19$...`) stored in the `password` column.
//! [`verify_password`] parses a stored PHC string and checks a candidate
//! against it: `Ok(false)` on mismatch, `Err` only when the stored hash is
//! malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

pub fn hash_password(plaintext: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(plaintext: &str, stored: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid stored password hash: {}", e)))?;
    Ok(Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok())
}
