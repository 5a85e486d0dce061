//! Request body types

use serde::{Deserialize, Serialize};

/// Body of an API request.
///
/// The service surface is JSON-only; binary image payloads never pass
/// through here because images are uploaded directly to presigned
/// storage URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// A JSON document.
    Json {
        /// The JSON value to send.
        value: serde_json::Value,
    },
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json {
            value: serde_json::to_value(value)?,
        })
    }

    /// Returns the content type for this body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
        }
    }

    /// Returns true if there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}
