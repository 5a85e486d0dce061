//! Application error types

use thiserror::Error;

use fieldfare_domain::{DomainError, NicknameError, ResponseSpec};

use crate::ports::TransportError;

/// Errors surfaced by the request pipeline and the services on top
/// of it.
///
/// `SessionExpired` is deliberately distinct from a plain 401 in
/// `Status`: it means the session itself is dead (a refresh failed,
/// or a retried request was rejected again) and the only useful
/// reaction is teardown, not retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before a response arrived (timeout, DNS,
    /// connection). Never triggers a token refresh.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status other than a
    /// recoverable 401.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The session cannot be recovered; stored tokens are gone.
    #[error("session expired")]
    SessionExpired,

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The token store failed.
    #[error("token store error: {0}")]
    Store(String),

    /// A request was rejected locally before dispatch.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A nickname was rejected locally before dispatch.
    #[error("invalid nickname: {0}")]
    Nickname(#[from] NicknameError),
}

impl ApiError {
    /// Builds the `Status` error for a non-success response.
    #[must_use]
    pub fn from_response(response: &ResponseSpec) -> Self {
        Self::Status {
            status: response.status,
            body: response.text(),
        }
    }

    /// Returns true if this error means the session was torn down.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
