//! Bookmark set with optimistic toggling

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ApiResult;
use crate::services::BirdService;

#[derive(Debug, Default)]
struct BookmarkState {
    ids: HashSet<i64>,
    /// One toggle at a time; concurrent calls are rejected, not queued.
    busy: bool,
}

/// The set of bookmarked bird ids, kept in sync with the backend.
///
/// `toggle` is optimistic: the set flips immediately, the API call
/// follows, and a failure rolls the flip back.
#[derive(Clone)]
pub struct BookmarkStore {
    birds: BirdService,
    state: Arc<RwLock<BookmarkState>>,
}

impl BookmarkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(birds: BirdService) -> Self {
        Self {
            birds,
            state: Arc::new(RwLock::new(BookmarkState::default())),
        }
    }

    /// Replaces the set with the server's. Failures (typically: not
    /// signed in) quietly leave an empty set.
    pub async fn sync(&self) {
        let ids = match self.birds.bookmarked_ids().await {
            Ok(ids) => ids.into_iter().collect(),
            Err(error) => {
                debug!(%error, "bookmark sync failed, clearing set");
                HashSet::new()
            }
        };
        self.state.write().await.ids = ids;
    }

    /// Returns true if the bird is currently bookmarked.
    pub async fn is_bookmarked(&self, bird_id: i64) -> bool {
        self.state.read().await.ids.contains(&bird_id)
    }

    /// Returns a snapshot of the bookmarked ids.
    pub async fn ids(&self) -> HashSet<i64> {
        self.state.read().await.ids.clone()
    }

    /// Optimistically toggles a bookmark.
    ///
    /// Returns `Ok(false)` without calling the API when another
    /// toggle is still in flight. On API failure the local flip is
    /// rolled back and the error propagated.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors after rolling back.
    pub async fn toggle(&self, bird_id: i64) -> ApiResult<bool> {
        {
            let mut state = self.state.write().await;
            if state.busy {
                return Ok(false);
            }
            state.busy = true;
            flip(&mut state.ids, bird_id);
        }

        let result = self.birds.toggle_bookmark(bird_id).await;

        let mut state = self.state.write().await;
        state.busy = false;
        match result {
            Ok(bookmarked) => {
                // Trust the server's resulting state over our flip.
                if bookmarked {
                    state.ids.insert(bird_id);
                } else {
                    state.ids.remove(&bird_id);
                }
                Ok(true)
            }
            Err(error) => {
                flip(&mut state.ids, bird_id);
                Err(error)
            }
        }
    }
}

fn flip(ids: &mut HashSet<i64>, bird_id: i64) {
    if !ids.remove(&bird_id) {
        ids.insert(bird_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_adds_then_removes() {
        let mut ids = HashSet::new();
        flip(&mut ids, 7);
        assert!(ids.contains(&7));
        flip(&mut ids, 7);
        assert!(!ids.contains(&7));
    }
}
