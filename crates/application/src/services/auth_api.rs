//! Login endpoint wrapper

use serde::{Deserialize, Serialize};

use fieldfare_domain::{RequestBody, RequestSpec, SignupStatus, TokenPair};

use crate::client::PublicClient;
use crate::error::{ApiError, ApiResult};

/// Outcome of a provider login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KakaoLogin {
    /// Tokens to hand to the token store.
    pub tokens: TokenPair,
    /// Where the account stands in onboarding.
    pub signup_status: SignupStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    access_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    signup_status: SignupStatus,
}

/// Wrapper for the unauthenticated login endpoint.
#[derive(Clone)]
pub struct AuthApi {
    public: PublicClient,
}

impl AuthApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(public: PublicClient) -> Self {
        Self { public }
    }

    /// Exchanges a Kakao OAuth access token for service credentials.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors; a rejected provider token
    /// arrives as `ApiError::Status`.
    pub async fn login_with_kakao(&self, provider_token: &str) -> ApiResult<KakaoLogin> {
        let body = RequestBody::json(&LoginRequest {
            access_token: provider_token,
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;

        let response = self
            .public
            .send(RequestSpec::post("/auth/kakao/login").with_body(body))
            .await?;

        let payload: LoginResponse = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(KakaoLogin {
            tokens: TokenPair::new(payload.access_token, payload.refresh_token),
            signup_status: payload.signup_status,
        })
    }
}
