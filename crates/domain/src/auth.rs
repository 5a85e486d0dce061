//! Authentication domain types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An access/refresh token pair.
///
/// Owned by the token store; the authenticated client never holds a
/// pair in memory beyond the lifetime of a single refresh operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived credential attached to each authenticated request.
    pub access_token: String,
    /// Longer-lived credential used solely to obtain new access tokens.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Where a freshly logged-in account stands in onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupStatus {
    /// The account exists but has no profile yet.
    ProfileRequired,
    /// Onboarding is complete.
    Completed,
}

/// Failures of the token refresh protocol.
///
/// Clone because a single refresh outcome is distributed to every
/// request queued behind the in-flight refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No refresh token is stored; the session cannot be recovered.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the stored refresh token.
    #[error("refresh rejected with status {status}")]
    RefreshRejected {
        /// HTTP status returned by the refresh endpoint.
        status: u16,
    },

    /// The refresh call itself failed at the transport level.
    #[error("refresh transport failure: {message}")]
    RefreshTransport {
        /// Description of the transport failure.
        message: String,
    },
}
