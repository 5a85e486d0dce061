//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, QueryParams, RequestBody};

/// Default transport timeout for every API call (15 seconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Descriptor for one HTTP call against the service API.
///
/// The path is service-relative (`/birds/`); the client joins it onto
/// its configured base URL at dispatch time. Retry state is *not*
/// part of the descriptor — see [`super::Attempt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Service-relative path (e.g., `/birds/bookmarks/items`)
    pub path: String,
    /// Query parameters
    #[serde(default)]
    pub query: QueryParams,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Transport-level timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RequestSpec {
    /// Creates a descriptor with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::none(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST descriptor.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PATCH descriptor.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE descriptor.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Overrides the transport timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
