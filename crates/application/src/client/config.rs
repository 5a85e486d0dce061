//! Client configuration

use url::Url;

/// Environment variable naming the API base URL.
pub const ENV_BASE_URL: &str = "FIELDFARE_API_BASE_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration shared by both clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto.
    pub base_url: Url,
}

impl ClientConfig {
    /// Creates a configuration with an explicit base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Resolves the base URL from `FIELDFARE_API_BASE_URL`, falling
    /// back to a local development server.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved value is not a valid URL.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: Url::parse(&raw)?,
        })
    }
}
