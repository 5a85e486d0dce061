//! HTTP transport port

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use fieldfare_domain::{Headers, HttpMethod, ResponseSpec};

/// A fully prepared request, ready for the wire: absolute URL,
/// final headers, concrete body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Final header set.
    pub headers: Headers,
    /// Concrete body.
    pub body: TransportBody,
    /// Transport-level timeout for this call.
    pub timeout: Duration,
}

/// Body of a prepared request.
#[derive(Debug, Clone)]
pub enum TransportBody {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// Raw bytes with an explicit content type (presigned uploads).
    Bytes {
        /// MIME type of the payload.
        content_type: String,
        /// The payload.
        data: Vec<u8>,
    },
}

/// Errors raised by a transport before a response could be produced.
///
/// An HTTP response with any status — including errors — is `Ok` at
/// this level; interpreting status codes is client policy.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Hostname that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The host refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be serialized onto the wire.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Anything else.
    #[error("transport error: {0}")]
    Other(String),
}

/// Port for dispatching prepared requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and collects the full response.
    ///
    /// # Errors
    ///
    /// Returns an error only when no HTTP response was produced.
    async fn execute(&self, request: TransportRequest) -> Result<ResponseSpec, TransportError>;
}

impl TransportRequest {
    /// Creates a request with no body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url, headers: Headers, timeout: Duration) -> Self {
        Self {
            method,
            url,
            headers,
            body: TransportBody::Empty,
            timeout,
        }
    }

    /// Attaches a body.
    #[must_use]
    pub fn with_body(mut self, body: TransportBody) -> Self {
        self.body = body;
        self
    }

    /// Returns the content type implied by the body, if any.
    #[must_use]
    pub fn body_content_type(&self) -> Option<&str> {
        match &self.body {
            TransportBody::Empty => None,
            TransportBody::Json(_) => Some("application/json"),
            TransportBody::Bytes { content_type, .. } => Some(content_type),
        }
    }
}
