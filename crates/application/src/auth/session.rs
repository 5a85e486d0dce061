//! Auth session state

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use fieldfare_domain::{SignupStatus, UserProfile};

use super::AuthEvents;
use crate::error::{ApiError, ApiResult};
use crate::ports::TokenStore;
use crate::services::{AuthApi, UserService};

/// Holds the signed-in user and reacts to session lifecycle events.
///
/// Clonable handle; every clone shares the same state.
#[derive(Clone)]
pub struct AuthSession {
    auth_api: AuthApi,
    users: UserService,
    tokens: Arc<dyn TokenStore>,
    events: AuthEvents,
    user: Arc<RwLock<Option<UserProfile>>>,
}

impl AuthSession {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new(
        auth_api: AuthApi,
        users: UserService,
        tokens: Arc<dyn TokenStore>,
        events: AuthEvents,
    ) -> Self {
        Self {
            auth_api,
            users,
            tokens,
            events,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Exchanges a provider token, persists the credential pair, and
    /// loads the profile. Returns the account's onboarding status.
    ///
    /// A profile-load failure does not fail the login: the tokens are
    /// valid, the caller just sees a signed-in session with no user
    /// yet (exactly what `refresh_user` reports).
    ///
    /// # Errors
    ///
    /// Propagates login-request and token-store failures.
    pub async fn login_with_kakao(&self, provider_token: &str) -> ApiResult<SignupStatus> {
        let login = self.auth_api.login_with_kakao(provider_token).await?;
        self.tokens
            .set_pair(&login.tokens)
            .await
            .map_err(|e| ApiError::Store(e.to_string()))?;

        self.refresh_user().await;
        Ok(login.signup_status)
    }

    /// Reloads the profile from the backend.
    ///
    /// Returns true when a signed-in user is present afterwards. A
    /// missing token means signed out; a failing profile fetch with a
    /// stored token means the token is dead, so it is discarded.
    pub async fn refresh_user(&self) -> bool {
        let token = match self.tokens.access_token().await {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "token store read failed");
                None
            }
        };

        if token.is_none() {
            *self.user.write().await = None;
            return false;
        }

        match self.users.me().await {
            Ok(profile) => {
                *self.user.write().await = Some(profile);
                true
            }
            Err(error) => {
                debug!(%error, "profile fetch failed, discarding session");
                *self.user.write().await = None;
                if let Err(store_error) = self.tokens.clear().await {
                    warn!(%store_error, "failed to clear tokens");
                }
                false
            }
        }
    }

    /// Clears the stored tokens and the in-memory user.
    pub async fn logout(&self) {
        if let Err(error) = self.tokens.clear().await {
            warn!(%error, "failed to clear tokens");
        }
        *self.user.write().await = None;
    }

    /// Returns the signed-in user, if any.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.user.read().await.clone()
    }

    /// Returns true when a user is signed in.
    pub async fn is_logged_in(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Spawns a task that clears the session whenever the
    /// auth-expired signal fires. The task ends when the event
    /// channel closes; abort the handle to stop it earlier.
    #[must_use]
    pub fn watch_expiry(&self) -> JoinHandle<()> {
        let mut listener = self.events.subscribe();
        let session = self.clone();
        tokio::spawn(async move {
            while listener.recv().await.is_ok() {
                debug!("auth expired, clearing session state");
                // Tokens are already gone; only local state remains.
                *session.user.write().await = None;
            }
        })
    }
}
