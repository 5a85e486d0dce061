//! Unauthenticated client

use std::sync::Arc;

use tracing::debug;
use url::Url;

use fieldfare_domain::{RequestSpec, ResponseSpec};

use super::{prepare, ClientConfig};
use crate::error::{ApiError, ApiResult};
use crate::ports::HttpTransport;

/// Client for calls that carry no credentials: login, token refresh,
/// and public reads.
#[derive(Clone)]
pub struct PublicClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
}

impl PublicClient {
    /// Creates a public client.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
        }
    }

    /// Dispatches a request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response and
    /// `ApiError::Transport` when no response was produced. There is
    /// no recovery of any kind at this level.
    pub async fn send(&self, spec: RequestSpec) -> ApiResult<ResponseSpec> {
        debug!(method = %spec.method, path = %spec.path, "public request");
        let prepared = prepare(&self.base_url, &spec, None)?;
        let response = self.transport.execute(prepared).await?;
        debug!(status = response.status, path = %spec.path, "public response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }
}
