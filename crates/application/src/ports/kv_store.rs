//! Key-value store port
//!
//! Backs small client-side records (search history) with whatever
//! string storage the platform offers.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during key-value operations.
#[derive(Debug, Error)]
pub enum KeyValueError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for a string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for a key, if present.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    /// Stores a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError>;

    /// Removes a key.
    async fn remove(&self, key: &str) -> Result<(), KeyValueError>;
}
