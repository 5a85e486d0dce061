//! File-based token store implementation.
//!
//! Tokens are stored in `tokens.json` under the app data directory.
//! On mobile targets the platform secure store takes this adapter's
//! place; the file variant serves desktop use and development.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use fieldfare_application::ports::{TokenStore, TokenStoreError};

/// On-disk shape of the credential pair.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Token store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store under the given directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("tokens.json"),
        }
    }

    async fn load(&self) -> Result<StoredTokens, TokenStoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| TokenStoreError::Serialization(e.to_string())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(error) => Err(TokenStoreError::Io(error)),
        }
    }

    async fn save(&self, tokens: &StoredTokens) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(tokens)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load().await?.access_token)
    }

    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut tokens = self.load().await?;
        tokens.access_token = Some(token.to_string());
        self.save(&tokens).await
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load().await?.refresh_token)
    }

    async fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut tokens = self.load().await?;
        tokens.refresh_token = Some(token.to_string());
        self.save(&tokens).await
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(TokenStoreError::Io(error)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fieldfare_domain::TokenPair;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store
            .set_pair(&TokenPair::new("access1", "refresh1"))
            .await
            .unwrap();

        assert_eq!(
            store.access_token().await.unwrap(),
            Some("access1".to_string())
        );
        assert_eq!(
            store.refresh_token().await.unwrap(),
            Some("refresh1".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_file_means_no_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_both() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set_access_token("a").await.unwrap();
        store.set_refresh_token("r").await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_rotating_refresh_keeps_access() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set_pair(&TokenPair::new("a1", "r1")).await.unwrap();
        store.set_refresh_token("r2").await.unwrap();

        assert_eq!(store.access_token().await.unwrap(), Some("a1".to_string()));
        assert_eq!(
            store.refresh_token().await.unwrap(),
            Some("r2".to_string())
        );
    }
}
