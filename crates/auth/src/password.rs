//! Argon2id password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2,
};
use rand::RngCore;

use crate::{AuthError, AuthResult};

/// Hashes a password with Argon2id and a fresh random salt.
///
/// The result is a self-describing PHC string; the plaintext is not needed
/// again except to verify against it.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verifies a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash itself
/// cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
