//! Bird encyclopedia and bookmark endpoints

use serde::Deserialize;

use fieldfare_domain::{Bird, BirdPage, BirdQuery, BirdSuggestion, QueryParams, RequestSpec};

use crate::client::{AuthClient, PublicClient};
use crate::error::{ApiError, ApiResult};

/// Bookmark list entries arrive either as bare ids or as objects,
/// depending on the endpoint revision.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BookmarkItem {
    Id(i64),
    Entry {
        #[serde(rename = "birdId")]
        bird_id: i64,
    },
}

impl BookmarkItem {
    const fn bird_id(&self) -> i64 {
        match self {
            Self::Id(id) | Self::Entry { bird_id: id } => *id,
        }
    }
}

/// The list itself is sometimes wrapped in `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BookmarkList {
    Wrapped { items: Vec<BookmarkItem> },
    Bare(Vec<BookmarkItem>),
}

impl BookmarkList {
    fn into_ids(self) -> Vec<i64> {
        let items = match self {
            Self::Wrapped { items } | Self::Bare(items) => items,
        };
        items.iter().map(BookmarkItem::bird_id).collect()
    }
}

#[derive(Debug, Deserialize)]
struct BookmarkStatus {
    bookmarked: bool,
}

/// Encyclopedia reads are public; bookmarks need the session.
#[derive(Clone)]
pub struct BirdService {
    public: PublicClient,
    private: AuthClient,
}

impl BirdService {
    /// Creates the service.
    #[must_use]
    pub const fn new(public: PublicClient, private: AuthClient) -> Self {
        Self { public, private }
    }

    /// Fetches one page of the encyclopedia.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn list(&self, query: &BirdQuery) -> ApiResult<BirdPage> {
        let spec = RequestSpec::get("/birds/").with_query(query.to_params());
        let response = self.public.send(spec).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetches one bird by id.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors; an unknown id arrives as
    /// `ApiError::Status` with 404.
    pub async fn detail(&self, bird_id: i64) -> ApiResult<Bird> {
        let response = self
            .public
            .send(RequestSpec::get(format!("/birds/{bird_id}")))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetches autocomplete suggestions for a search box term.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn autocomplete(&self, term: &str) -> ApiResult<Vec<BirdSuggestion>> {
        let mut params = QueryParams::new();
        params.append("q", term);
        let response = self
            .public
            .send(RequestSpec::get("/birds/autocomplete").with_query(params))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Looks a bird up by exact name, falling back to the best match.
    ///
    /// Returns None when the search comes back empty.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn find_by_name(&self, name: &str) -> ApiResult<Option<Bird>> {
        let query = BirdQuery::page(1, 20).with_term(name);
        let page = self.list(&query).await?;

        let exact = page.birds.iter().position(|b| b.korean_name == name);
        let mut birds = page.birds;
        Ok(match exact {
            Some(index) => Some(birds.swap_remove(index)),
            None if birds.is_empty() => None,
            None => Some(birds.swap_remove(0)),
        })
    }

    /// Fetches the ids of every bookmarked bird.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors; an expired session arrives
    /// as `ApiError::SessionExpired`.
    pub async fn bookmarked_ids(&self) -> ApiResult<Vec<i64>> {
        let response = self
            .private
            .send(RequestSpec::get("/birds/bookmarks/items"))
            .await?;
        let list: BookmarkList = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(list.into_ids())
    }

    /// Returns whether one bird is bookmarked.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn bookmark_status(&self, bird_id: i64) -> ApiResult<bool> {
        let response = self
            .private
            .send(RequestSpec::get(format!("/birds/bookmarks/{bird_id}/status")))
            .await?;
        let status: BookmarkStatus = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(status.bookmarked)
    }

    /// Toggles a bookmark and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn toggle_bookmark(&self, bird_id: i64) -> ApiResult<bool> {
        let response = self
            .private
            .send(RequestSpec::post(format!("/birds/bookmarks/{bird_id}/toggle")))
            .await?;
        let status: BookmarkStatus = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(status.bookmarked)
    }
}
