//! Secret store port
//!
//! One-shot retrieval of a named credential bundle, done once at startup.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Failed to retrieve secret '{name}': {reason}")]
    Retrieval { name: String, reason: String },

    #[error("Secret '{0}' has no string value")]
    NotAString(String),
}

#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret string stored under `name`
    async fn get_secret(&self, name: &str) -> Result<String, SecretError>;
}
