//! User profile endpoints

use serde::{Deserialize, Serialize};

use fieldfare_domain::{validate_nickname, NicknameCheck, QueryParams, RequestBody, RequestSpec, UserProfile};

use crate::client::{AuthClient, PublicClient};
use crate::error::{ApiError, ApiResult};

/// Response of a nickname change; the backend echoes the new profile
/// without the join date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameUpdate {
    /// The new display name.
    pub nickname: String,
    /// Account email.
    pub email: String,
}

#[derive(Debug, Serialize)]
struct NicknamePayload<'a> {
    nickname: &'a str,
}

/// Profile reads/writes need the session; the availability check is
/// public so it also works during onboarding.
#[derive(Clone)]
pub struct UserService {
    public: PublicClient,
    private: AuthClient,
}

impl UserService {
    /// Creates the service.
    #[must_use]
    pub const fn new(public: PublicClient, private: AuthClient) -> Self {
        Self { public, private }
    }

    /// Fetches the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors; an expired session arrives
    /// as `ApiError::SessionExpired`.
    pub async fn me(&self) -> ApiResult<UserProfile> {
        let response = self.private.send(RequestSpec::get("/user/me")).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Changes the nickname, validating it locally first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Nickname` without dispatching when the name
    /// breaks a local rule; otherwise propagates pipeline errors.
    pub async fn update_nickname(&self, nickname: &str) -> ApiResult<NicknameUpdate> {
        validate_nickname(nickname)?;
        let body = RequestBody::json(&NicknamePayload {
            nickname: nickname.trim(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .private
            .send(RequestSpec::patch("/user/me").with_body(body))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Asks the server whether a nickname is free.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn check_nickname(&self, nickname: &str) -> ApiResult<NicknameCheck> {
        let mut params = QueryParams::new();
        params.append("nickname", nickname.trim());
        let response = self
            .public
            .send(RequestSpec::get("/user/check-nickname").with_query(params))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }
}
