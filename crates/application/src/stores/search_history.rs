//! Persisted search history

use std::sync::Arc;

use tracing::warn;

use fieldfare_domain::search::{remove_at_reverse_index, SearchRecord};

use crate::ports::{Clock, KeyValueError, KeyValueStore};

/// Storage key for the encyclopedia search history.
const HISTORY_KEY: &str = "search-history:birds";

/// The remembered encyclopedia searches, newest last in storage and
/// newest first on screen.
#[derive(Clone)]
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SearchHistory {
    /// Creates the history over a key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Loads the stored records. A corrupt payload is treated as an
    /// empty history rather than an error.
    ///
    /// # Errors
    ///
    /// Returns storage errors only.
    pub async fn load(&self) -> Result<Vec<SearchRecord>, KeyValueError> {
        let Some(raw) = self.store.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(error) => {
                warn!(%error, "search history corrupt, starting over");
                Ok(Vec::new())
            }
        }
    }

    /// Appends a search and returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns storage errors.
    pub async fn add(&self, keyword: &str) -> Result<Vec<SearchRecord>, KeyValueError> {
        let date = self.clock.now().format("%m. %d.").to_string();
        let mut records = self.load().await?;
        records.push(SearchRecord::new(keyword, date));
        self.save(&records).await?;
        Ok(records)
    }

    /// Removes the record at the given on-screen (reverse) index and
    /// returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns storage errors.
    pub async fn remove_at(&self, reverse_index: usize) -> Result<Vec<SearchRecord>, KeyValueError> {
        let mut records = self.load().await?;
        remove_at_reverse_index(&mut records, reverse_index);
        self.save(&records).await?;
        Ok(records)
    }

    /// Forgets every search.
    ///
    /// # Errors
    ///
    /// Returns storage errors.
    pub async fn clear(&self) -> Result<(), KeyValueError> {
        self.store.remove(HISTORY_KEY).await
    }

    async fn save(&self, records: &[SearchRecord]) -> Result<(), KeyValueError> {
        let raw = serde_json::to_string(records)
            .map_err(|e| KeyValueError::Serialization(e.to_string()))?;
        self.store.set(HISTORY_KEY, &raw).await
    }
}
