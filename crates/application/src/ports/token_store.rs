//! Token store port
//!
//! The real store is the platform's secure storage; this port only
//! assumes that each operation is a single atomic call.

use async_trait::async_trait;
use thiserror::Error;

use fieldfare_domain::TokenPair;

/// Errors that can occur during token store operations.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the access/refresh token pair.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored access token, if any.
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Stores a new access token.
    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Returns the stored refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Stores a new refresh token.
    async fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Removes both tokens.
    async fn clear(&self) -> Result<(), TokenStoreError>;

    /// Stores both tokens of a pair.
    async fn set_pair(&self, pair: &TokenPair) -> Result<(), TokenStoreError> {
        self.set_access_token(&pair.access_token).await?;
        self.set_refresh_token(&pair.refresh_token).await
    }
}
