//! Password hashing
//!
//! Thin wrapper over bcrypt. Handlers use the `_async` variants, which
//! keep the hashing work off the async worker threads. Plaintext passwords never leave this module in
//! any form other than a bcrypt hash.

use bcrypt::{hash, verify, BcryptError};

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check a candidate password against a stored hash
///
/// A corrupt stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or_else(|e| {
        tracing::error!("Password verification error: {:?}", e);
        false
    })
}

/// `hash_password` on the blocking thread pool
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, BcryptError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| BcryptError::Io(std::io::Error::other(e)))?
}

/// `verify_password` on the blocking thread pool
pub async fn verify_password_async(password: String, password_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Password verification task failed: {}", e);
            false
        })
}
