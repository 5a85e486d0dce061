//! Bird encyclopedia ("dex") types

use serde::{Deserialize, Serialize};

use crate::request::QueryParams;

/// One bird in the encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bird {
    /// Backend identifier.
    pub id: i64,
    /// Common (Korean) name.
    pub korean_name: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Thumbnail image, if the encyclopedia has one.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One page of encyclopedia results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdPage {
    /// Birds on this page.
    pub birds: Vec<Bird>,
}

/// An autocomplete suggestion for the encyclopedia search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirdSuggestion {
    /// Backend identifier of the suggested bird.
    pub bird_id: i64,
    /// Suggested name.
    pub korean_name: String,
}

/// Encyclopedia list filters.
///
/// Values are the backend's filter codes (e.g. `SPRING`, `WETLAND`);
/// each list is serialized as a repeated query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdFilters {
    /// Season codes.
    #[serde(default)]
    pub seasons: Vec<String>,
    /// Habitat codes.
    #[serde(default)]
    pub habitats: Vec<String>,
    /// Size-category codes.
    #[serde(default)]
    pub size_categories: Vec<String>,
}

impl BirdFilters {
    /// Returns true if no filter is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() && self.habitats.is_empty() && self.size_categories.is_empty()
    }
}

/// A full encyclopedia list query: search term, page, and filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirdQuery {
    /// Search term; empty terms are omitted from the query string.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Selected filters.
    pub filters: BirdFilters,
}

impl BirdQuery {
    /// Creates a query for the given page with no term or filters.
    #[must_use]
    pub const fn page(page: u32, size: u32) -> Self {
        Self {
            q: None,
            page,
            size,
            filters: BirdFilters {
                seasons: Vec::new(),
                habitats: Vec::new(),
                size_categories: Vec::new(),
            },
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_term(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Sets the filters.
    #[must_use]
    pub fn with_filters(mut self, filters: BirdFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Serializes the query into request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(q) = self.q.as_deref() {
            let trimmed = q.trim();
            if !trimmed.is_empty() {
                params.append("q", trimmed);
            }
        }
        params.append("page", self.page.to_string());
        params.append("size", self.size.to_string());
        params.append_all("seasons", self.filters.seasons.iter().cloned());
        params.append_all("habitats", self.filters.habitats.iter().cloned());
        params.append_all("sizeCategories", self.filters.size_categories.iter().cloned());
        params
    }
}
