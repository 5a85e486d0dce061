//! In-memory token store implementation.
//!
//! Holds the pair for the lifetime of the process. Useful for tests
//! and for sessions that should not outlive a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use fieldfare_application::ports::{TokenStore, TokenStoreError};

#[derive(Debug, Default)]
struct Pair {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Token store living entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Pair>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.inner.read().await.access_token.clone())
    }

    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.inner.write().await.access_token = Some(token.to_string());
        Ok(())
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.inner.read().await.refresh_token.clone())
    }

    async fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.inner.write().await.refresh_token = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.inner.write().await = Pair::default();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fieldfare_domain::TokenPair;

    #[tokio::test]
    async fn test_pair_round_trip() {
        let store = MemoryTokenStore::new();
        store.set_pair(&TokenPair::new("a", "r")).await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), Some("a".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("r".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
    }
}
