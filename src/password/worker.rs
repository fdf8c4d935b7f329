//! Async wrappers that run the KDF on tokio's blocking pool instead of an
//! executor thread.

use super::{hash_password, verify_password, Config};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};

/// Hash `password` on the blocking thread pool.
///
/// # Errors
/// Returns the engine error (downcastable to [`super::Error`]) or a join error
/// if the blocking task panicked or was cancelled.
pub async fn hash_password_blocking(config: Config, password: SecretString) -> Result<String> {
    let encoded = tokio::task::spawn_blocking(move || {
        hash_password(&config, password.expose_secret().as_bytes())
    })
    .await
    .context("password hashing task failed")??;

    Ok(encoded)
}

/// Verify `password` against `encoded` on the blocking thread pool.
///
/// # Errors
/// Returns the engine error (downcastable to [`super::Error`]) or a join error
/// if the blocking task panicked or was cancelled.
pub async fn verify_password_blocking(encoded: String, password: SecretString) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        verify_password(&encoded, password.expose_secret().as_bytes())
    })
    .await
    .context("password verification task failed")??;

    Ok(())
}
