//! Password hashing and verification.
//!
//! DESIGN
//! ======
//! Argon2id with per-password random salts, emitting PHC-format
//! digests. A failed verification is a normal `Ok(false)`; only a
//! digest that cannot be parsed at all is an error, so callers can
//! tell "wrong password" apart from "corrupt stored credential".
//! Comparison timing is the primitive's concern, not ours.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The stored digest is not a parseable PHC string.
    #[error("corrupt password digest")]
    CorruptDigest,
    /// The hasher itself failed (bad parameters, salt generation).
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a plaintext password into a self-describing PHC digest.
///
/// # Errors
///
/// Returns [`CredentialError::Hashing`] if the hasher rejects its
/// input; this does not happen for ordinary passwords.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest.
///
/// # Errors
///
/// Returns [`CredentialError::CorruptDigest`] only when `digest` is
/// malformed. A mismatched password is `Ok(false)`, not an error.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(digest).map_err(|_| CredentialError::CorruptDigest)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(CredentialError::CorruptDigest),
    }
}

#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;
