//! File-based key-value store implementation.
//!
//! One file per key under a directory. Keys are sanitized to stay
//! within portable file-name characters, so distinct keys that
//! sanitize identically would collide; the client's fixed key set
//! keeps that from occurring.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use fieldfare_application::ports::{KeyValueError, KeyValueStore};

/// Key-value store backed by one file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store under the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize(key))
    }
}

fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(KeyValueError::Io(error)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(KeyValueError::Io(error)),
        }
    }
}

impl FileKeyValueStore {
    /// Returns the directory this store writes under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
