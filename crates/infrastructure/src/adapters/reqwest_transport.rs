//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest
//! library. It handles all HTTP communication for the client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use fieldfare_application::ports::{HttpTransport, TransportBody, TransportError, TransportRequest};
use fieldfare_domain::{Header, Headers, HttpMethod, ResponseSpec};

/// HTTP transport backed by `reqwest::Client`.
///
/// Status codes are never interpreted here: any HTTP response is a
/// successful transport outcome. Recovery policy lives in the
/// clients.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Fieldfare/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent("Fieldfare/0.1.0")
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the port's `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return TransportError::Dns { host, message };
            }
            if message.to_lowercase().contains("refused") {
                return TransportError::ConnectionRefused {
                    host,
                    port: error.url().and_then(url::Url::port).unwrap_or(80),
                };
            }
            return TransportError::Connection(message);
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<ResponseSpec, TransportError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        debug!(method = %method, url = %url, "dispatching request");

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), url)
            .timeout(timeout);

        for header in headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        // The body dictates the Content-Type unless the caller set one.
        let content_type = match &body {
            TransportBody::Empty => None,
            TransportBody::Json(_) => Some("application/json".to_string()),
            TransportBody::Bytes { content_type, .. } => Some(content_type.clone()),
        };
        if let Some(content_type) = content_type
            && !headers.contains("content-type")
        {
            builder = builder.header("Content-Type", content_type);
        }

        builder = match body {
            TransportBody::Empty => builder,
            TransportBody::Json(value) => builder.body(
                serde_json::to_vec(&value)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))?,
            ),
            TransportBody::Bytes { data, .. } => builder.body(data),
        };

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let response_headers: Headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                Header::new(name.to_string(), value.to_str().unwrap_or("<binary>"))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        let duration = start.elapsed();
        debug!(
            status,
            elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        Ok(ResponseSpec::new(status, response_headers, body, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }
}
