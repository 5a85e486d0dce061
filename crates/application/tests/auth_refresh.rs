//! Recovery-protocol tests for the authenticated client.
//!
//! A scripted transport stands in for the backend: encyclopedia and
//! profile paths accept exactly one bearer token, the refresh
//! endpoint follows a per-test script, and the transport can hold the
//! refresh response until a given number of stale-credential 401s
//! have been handed out — which is how the tests line up several
//! logically concurrent requests behind one refresh.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{RwLock, Semaphore};
use url::Url;

use fieldfare_application::ports::{
    HttpTransport, TokenStore, TokenStoreError, TransportError, TransportRequest,
};
use fieldfare_application::{ApiError, AuthClient, AuthEvents, ClientConfig};
use fieldfare_domain::{Headers, RequestSpec, ResponseSpec};

// ---------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------

#[derive(Default)]
struct MemoryTokens {
    inner: RwLock<(Option<String>, Option<String>)>,
}

impl MemoryTokens {
    fn with(access: &str, refresh: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new((Some(access.to_string()), Some(refresh.to_string()))),
        })
    }
}

#[async_trait]
impl TokenStore for MemoryTokens {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.inner.read().await.0.clone())
    }

    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.inner.write().await.0 = Some(token.to_string());
        Ok(())
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.inner.read().await.1.clone())
    }

    async fn set_refresh_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.inner.write().await.1 = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.inner.write().await = (None, None);
        Ok(())
    }
}

/// How the refresh endpoint behaves, after holding its response until
/// `wait_for_stale` stale-credential 401s have gone out. The hold is
/// what lets a test line up N concurrent requests behind one refresh.
struct RefreshScript {
    outcome: RefreshOutcome,
    wait_for_stale: u32,
}

enum RefreshOutcome {
    /// Respond 200 with a new access token (and optionally a rotated
    /// refresh token).
    Succeed {
        access: String,
        rotated: Option<String>,
    },
    /// Respond with a non-2xx status.
    Reject { status: u16 },
}

impl RefreshScript {
    fn succeed(access: &str, rotated: Option<&str>, wait_for_stale: u32) -> Self {
        Self {
            outcome: RefreshOutcome::Succeed {
                access: access.to_string(),
                rotated: rotated.map(str::to_string),
            },
            wait_for_stale,
        }
    }

    const fn reject(status: u16, wait_for_stale: u32) -> Self {
        Self {
            outcome: RefreshOutcome::Reject { status },
            wait_for_stale,
        }
    }
}

enum ApiFailure {
    Status(u16),
    Timeout,
}

struct ScriptedTransport {
    /// The only bearer token API paths accept.
    valid_token: String,
    refresh: RefreshScript,
    refresh_calls: AtomicUsize,
    /// One permit per stale-credential 401 handed out.
    stale_permits: Arc<Semaphore>,
    /// Every API call: (path, Authorization header).
    api_calls: Mutex<Vec<(String, Option<String>)>>,
    /// Force a specific path to fail without engaging auth at all.
    fail_with: Option<(String, ApiFailure)>,
}

impl ScriptedTransport {
    fn new(valid_token: &str, refresh: RefreshScript) -> Arc<Self> {
        Arc::new(Self {
            valid_token: valid_token.to_string(),
            refresh,
            refresh_calls: AtomicUsize::new(0),
            stale_permits: Arc::new(Semaphore::new(0)),
            api_calls: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    fn failing(valid_token: &str, path: &str, failure: ApiFailure) -> Arc<Self> {
        Arc::new(Self {
            valid_token: valid_token.to_string(),
            refresh: RefreshScript::reject(500, 0),
            refresh_calls: AtomicUsize::new(0),
            stale_permits: Arc::new(Semaphore::new(0)),
            api_calls: Mutex::new(Vec::new()),
            fail_with: Some((path.to_string(), failure)),
        })
    }

    fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn successful_authorizations(&self) -> Vec<String> {
        self.api_calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, auth)| auth.clone())
            .filter(|auth| *auth == format!("Bearer {}", self.valid_token))
            .collect()
    }
}

fn json_response(status: u16, body: serde_json::Value) -> ResponseSpec {
    ResponseSpec::new(
        status,
        Headers::new(),
        serde_json::to_vec(&body).unwrap(),
        Duration::ZERO,
    )
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: TransportRequest) -> Result<ResponseSpec, TransportError> {
        let path = request.url.path().to_string();

        if path == "/auth/refresh" {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if self.refresh.wait_for_stale > 0 {
                self.stale_permits
                    .acquire_many(self.refresh.wait_for_stale)
                    .await
                    .unwrap()
                    .forget();
            }
            return match &self.refresh.outcome {
                RefreshOutcome::Succeed { access, rotated } => Ok(json_response(
                    200,
                    serde_json::json!({
                        "accessToken": access,
                        "refreshToken": rotated,
                    }),
                )),
                RefreshOutcome::Reject { status } => Ok(json_response(
                    *status,
                    serde_json::json!({"error": "invalid refresh token"}),
                )),
            };
        }

        let auth = request.headers.get("authorization").map(str::to_string);
        self.api_calls.lock().unwrap().push((path.clone(), auth.clone()));

        if let Some((fail_path, failure)) = &self.fail_with
            && *fail_path == path
        {
            return match failure {
                ApiFailure::Status(status) => {
                    Ok(json_response(*status, serde_json::json!({"error": "boom"})))
                }
                ApiFailure::Timeout => Err(TransportError::Timeout { timeout_ms: 15_000 }),
            };
        }

        if auth.as_deref() == Some(&format!("Bearer {}", self.valid_token)) {
            Ok(json_response(200, serde_json::json!({"ok": true})))
        } else {
            self.stale_permits.add_permits(1);
            Ok(json_response(401, serde_json::json!({"message": "unauthorized"})))
        }
    }
}

fn client(
    transport: &Arc<ScriptedTransport>,
    tokens: &Arc<MemoryTokens>,
    events: &AuthEvents,
) -> AuthClient {
    let config = ClientConfig::new(Url::parse("http://api.test").unwrap());
    AuthClient::new(
        Arc::clone(transport) as Arc<dyn HttpTransport>,
        Arc::clone(tokens) as Arc<dyn TokenStore>,
        &config,
        events.clone(),
    )
}

// ---------------------------------------------------------------
// Properties
// ---------------------------------------------------------------

/// P1 + P2: N concurrent 401s cause exactly one refresh, and every
/// queued request ends up succeeding with the refreshed token.
#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let transport =
        ScriptedTransport::new("fresh", RefreshScript::succeed("fresh", Some("r2"), 3));
    let tokens = MemoryTokens::with("stale", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let (a, b, c) = tokio::join!(
        client.send(RequestSpec::get("/user/me")),
        client.send(RequestSpec::get("/birds/bookmarks/items")),
        client.send(RequestSpec::get("/sightings/me")),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(transport.refresh_calls(), 1);
    // All three retries carried the refreshed token.
    assert_eq!(transport.successful_authorizations().len(), 3);
    // The rotated refresh token was persisted.
    assert_eq!(
        tokens.refresh_token().await.unwrap(),
        Some("r2".to_string())
    );
}

/// P3: a request rejected again after its one retry fails with the
/// session-expired error, without a second refresh on its behalf.
#[tokio::test]
async fn second_401_is_final() {
    // The refresh "succeeds" but hands back a token the API still
    // rejects, so the retry 401s too.
    let transport =
        ScriptedTransport::new("never-issued", RefreshScript::succeed("still-stale", None, 1));
    let tokens = MemoryTokens::with("stale", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let result = client.send(RequestSpec::get("/user/me")).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(transport.refresh_calls(), 1);
}

/// P4: a failed refresh tears the session down once, for everyone.
#[tokio::test]
async fn failed_refresh_tears_down_session() {
    // Hold the rejection until both requests have 401'd and queued.
    let transport = ScriptedTransport::new("fresh", RefreshScript::reject(400, 2));
    let tokens = MemoryTokens::with("stale", "r1");
    let events = AuthEvents::new();
    let mut expired = events.subscribe();
    let client = client(&transport, &tokens, &events);

    let (a, b) = tokio::join!(
        client.send(RequestSpec::get("/user/me")),
        client.send(RequestSpec::get("/sightings/me")),
    );

    assert!(matches!(a, Err(ApiError::SessionExpired)));
    assert!(matches!(b, Err(ApiError::SessionExpired)));
    assert_eq!(transport.refresh_calls(), 1);

    // Tokens cleared.
    assert_eq!(tokens.access_token().await.unwrap(), None);
    assert_eq!(tokens.refresh_token().await.unwrap(), None);

    // Signal fired exactly once.
    assert!(expired.recv().await.is_ok());
    assert!(expired.try_recv().is_err());
}

/// P5: non-auth failures propagate unchanged and never refresh.
#[tokio::test]
async fn server_error_does_not_refresh() {
    let transport =
        ScriptedTransport::failing("fresh", "/birds/bookmarks/items", ApiFailure::Status(500));
    let tokens = MemoryTokens::with("fresh", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let result = client.send(RequestSpec::get("/birds/bookmarks/items")).await;

    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    assert_eq!(transport.refresh_calls(), 0);
}

#[tokio::test]
async fn timeout_does_not_refresh() {
    let transport = ScriptedTransport::failing("fresh", "/user/me", ApiFailure::Timeout);
    let tokens = MemoryTokens::with("fresh", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let result = client.send(RequestSpec::get("/user/me")).await;

    assert!(matches!(
        result,
        Err(ApiError::Transport(TransportError::Timeout { .. }))
    ));
    assert_eq!(transport.refresh_calls(), 0);
}

/// A valid token passes straight through with no recovery machinery.
#[tokio::test]
async fn valid_token_needs_no_recovery() {
    let transport = ScriptedTransport::new("fresh", RefreshScript::reject(500, 0));
    let tokens = MemoryTokens::with("fresh", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let result = client.send(RequestSpec::get("/user/me")).await;

    assert!(result.is_ok());
    assert_eq!(transport.refresh_calls(), 0);
}

// ---------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------

/// Request A 401s and starts the refresh; request B 401s while it is
/// in flight and queues. The refresh returns a new token; both
/// requests are resent with it and succeed; the refresh endpoint was
/// invoked exactly once.
#[tokio::test]
async fn scenario_queued_request_reuses_single_refresh() {
    let transport = ScriptedTransport::new("new", RefreshScript::succeed("new", None, 2));
    let tokens = MemoryTokens::with("old", "r1");
    let events = AuthEvents::new();
    let client = client(&transport, &tokens, &events);

    let (a, b) = tokio::join!(
        client.send(RequestSpec::get("/user/me")),
        client.send(RequestSpec::get("/sightings/me")),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(transport.refresh_calls(), 1);
    assert_eq!(tokens.access_token().await.unwrap(), Some("new".to_string()));

    let resent = transport.successful_authorizations();
    assert_eq!(resent, vec!["Bearer new".to_string(), "Bearer new".to_string()]);

    // No rotation in the response: the stored refresh token is kept.
    assert_eq!(
        tokens.refresh_token().await.unwrap(),
        Some("r1".to_string())
    );
}

/// Request C 401s and the refresh itself comes back 400: tokens are
/// cleared, the signal fires once, and C fails with the
/// session-expired error rather than a generic 401.
#[tokio::test]
async fn scenario_refresh_rejection_is_not_a_plain_401() {
    let transport = ScriptedTransport::new("fresh", RefreshScript::reject(400, 1));
    let tokens = MemoryTokens::with("stale", "r1");
    let events = AuthEvents::new();
    let mut expired = events.subscribe();
    let client = client(&transport, &tokens, &events);

    let result = client.send(RequestSpec::get("/user/me")).await;

    match result {
        Err(ApiError::SessionExpired) => {}
        other => panic!("expected SessionExpired, got {other:?}"),
    }
    assert_eq!(tokens.access_token().await.unwrap(), None);
    assert!(expired.recv().await.is_ok());
    assert!(expired.try_recv().is_err());
    assert_eq!(transport.refresh_calls(), 1);
}
