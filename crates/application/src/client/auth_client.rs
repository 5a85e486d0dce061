//! Authenticated client with transparent token refresh

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use fieldfare_domain::{Attempt, AuthError, RequestBody, RequestSpec, ResponseSpec};

use super::{prepare, ClientConfig, PublicClient};
use crate::auth::{AuthEvents, RefreshGate, RefreshSlot};
use crate::error::{ApiError, ApiResult};
use crate::ports::{HttpTransport, TokenStore};

/// Path of the token refresh endpoint, called via the public client.
const REFRESH_PATH: &str = "/auth/refresh";

/// The refresh token travels in the request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    /// Present only when the backend rotates refresh tokens.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Client for credentialed calls.
///
/// Every request goes out with the stored access token as a bearer
/// credential. A 401 starts one recovery cycle: the token is
/// refreshed (at most one refresh in flight process-wide; concurrent
/// 401s queue behind it) and the request is retried once with the new
/// token. A second 401, or a failed refresh, ends the session: stored
/// tokens are cleared, the auth-expired signal fires once, and every
/// affected request fails with [`ApiError::SessionExpired`].
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
    base_url: Url,
    public: PublicClient,
    gate: Arc<RefreshGate>,
    events: AuthEvents,
}

impl AuthClient {
    /// Creates an authenticated client sharing the given transport
    /// and token store.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
        config: &ClientConfig,
        events: AuthEvents,
    ) -> Self {
        let public = PublicClient::new(Arc::clone(&transport), config);
        Self {
            transport,
            tokens,
            base_url: config.base_url.clone(),
            public,
            gate: Arc::new(RefreshGate::new()),
            events,
        }
    }

    /// Dispatches a request with the 401 recovery protocol.
    ///
    /// # Errors
    ///
    /// Non-401 failures are propagated unchanged: transport errors as
    /// `ApiError::Transport`, other statuses as `ApiError::Status`.
    /// An unrecoverable credential failure is `ApiError::SessionExpired`.
    pub async fn send(&self, spec: RequestSpec) -> ApiResult<ResponseSpec> {
        let mut attempt = Attempt::first(spec);
        loop {
            let response = self.dispatch(attempt.request()).await?;

            if !response.is_unauthorized() {
                return if response.is_success() {
                    Ok(response)
                } else {
                    Err(ApiError::from_response(&response))
                };
            }

            if attempt.is_retry() {
                // Rejected again with the refreshed token: the
                // session is dead, not the request.
                warn!(path = %attempt.request().path, "401 after retry, giving up");
                return Err(ApiError::SessionExpired);
            }

            self.recover().await?;
            attempt = attempt.into_retry();
        }
    }

    /// Sends one attempt with the currently stored access token.
    async fn dispatch(&self, spec: &RequestSpec) -> ApiResult<ResponseSpec> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| ApiError::Store(e.to_string()))?;

        debug!(method = %spec.method, path = %spec.path, "authenticated request");
        let prepared = prepare(&self.base_url, spec, token.as_deref())?;
        let response = self.transport.execute(prepared).await?;
        debug!(status = response.status, path = %spec.path, "authenticated response");
        Ok(response)
    }

    /// Runs or joins the single recovery cycle for a first-attempt 401.
    async fn recover(&self) -> ApiResult<()> {
        match self.gate.acquire() {
            RefreshSlot::Leader => match self.run_refresh().await {
                Ok(()) => {
                    self.gate.settle(Ok(()));
                    Ok(())
                }
                Err(error) => {
                    warn!(%error, "token refresh failed, tearing down session");
                    self.gate.settle(Err(error.clone()));
                    if let Err(store_error) = self.tokens.clear().await {
                        warn!(%store_error, "failed to clear tokens");
                    }
                    self.events.emit();
                    Err(ApiError::SessionExpired)
                }
            },
            RefreshSlot::Follower(waiter) => match waiter.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(_)) | Err(_) => Err(ApiError::SessionExpired),
            },
        }
    }

    /// Calls the refresh endpoint and persists the new tokens.
    async fn run_refresh(&self) -> Result<(), AuthError> {
        let refresh_token = self
            .tokens
            .refresh_token()
            .await
            .map_err(|e| AuthError::RefreshTransport {
                message: e.to_string(),
            })?
            .ok_or(AuthError::MissingRefreshToken)?;

        let body =
            RequestBody::json(&RefreshRequest { refresh_token }).map_err(|e| {
                AuthError::RefreshTransport {
                    message: e.to_string(),
                }
            })?;

        let response = match self.public.send(RequestSpec::post(REFRESH_PATH).with_body(body)).await
        {
            Ok(response) => response,
            Err(ApiError::Status { status, .. }) => {
                return Err(AuthError::RefreshRejected { status });
            }
            Err(error) => {
                return Err(AuthError::RefreshTransport {
                    message: error.to_string(),
                });
            }
        };

        let refreshed: RefreshResponse =
            response.json().map_err(|e| AuthError::RefreshTransport {
                message: e.to_string(),
            })?;

        self.tokens
            .set_access_token(&refreshed.access_token)
            .await
            .map_err(|e| AuthError::RefreshTransport {
                message: e.to_string(),
            })?;

        if let Some(rotated) = refreshed.refresh_token {
            self.tokens
                .set_refresh_token(&rotated)
                .await
                .map_err(|e| AuthError::RefreshTransport {
                    message: e.to_string(),
                })?;
        }

        debug!("access token refreshed");
        Ok(())
    }
}
