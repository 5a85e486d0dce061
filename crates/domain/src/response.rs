//! Response specification type

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::request::Headers;

/// Status code the authenticated client treats as a recoverable
/// credential failure.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Outcome of one dispatched HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw response body
    pub body: Vec<u8>,
    /// Time from dispatch to the last body byte
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code is 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            headers: Headers::new(),
            body: Vec::new(),
            duration: Duration::ZERO,
        }
    }
}
