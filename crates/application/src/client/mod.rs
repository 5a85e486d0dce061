//! HTTP clients
//!
//! [`PublicClient`] issues unauthenticated calls (login, refresh,
//! public reads). [`AuthClient`] wraps every call with the stored
//! bearer credential and runs the 401 recovery protocol.

mod auth_client;
mod config;
mod public;

pub use auth_client::AuthClient;
pub use config::ClientConfig;
pub use public::PublicClient;

use std::time::Duration;

use url::Url;

use fieldfare_domain::{Header, RequestBody, RequestSpec};

use crate::error::ApiError;
use crate::ports::{TransportBody, TransportError, TransportRequest};

/// Turns a descriptor into a wire-ready request: joins the base URL,
/// encodes the query string, and attaches the bearer credential when
/// one is given.
pub(crate) fn prepare(
    base_url: &Url,
    spec: &RequestSpec,
    bearer: Option<&str>,
) -> Result<TransportRequest, ApiError> {
    let mut url = base_url.join(&spec.path).map_err(|e| {
        ApiError::Transport(TransportError::InvalidUrl(format!("{e}: {}", spec.path)))
    })?;

    if !spec.query.is_empty() {
        let encoded = serde_urlencoded::to_string(spec.query.pairs())
            .map_err(|e| ApiError::Transport(TransportError::InvalidUrl(e.to_string())))?;
        url.set_query(Some(&encoded));
    }

    let mut headers = spec.headers.clone();
    if let Some(token) = bearer {
        headers.add(Header::bearer(token));
    }

    let body = match &spec.body {
        RequestBody::None => TransportBody::Empty,
        RequestBody::Json { value } => TransportBody::Json(value.clone()),
    };

    Ok(
        TransportRequest::new(spec.method, url, headers, Duration::from_millis(spec.timeout_ms))
            .with_body(body),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fieldfare_domain::QueryParams;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    #[test]
    fn test_prepare_joins_path_and_query() {
        let mut query = QueryParams::new();
        query.append("q", "robin");
        query.append_all("seasons", ["SPRING", "WINTER"]);

        let spec = RequestSpec::get("/birds/").with_query(query);
        let prepared = prepare(&base(), &spec, None).unwrap();

        assert_eq!(
            prepared.url.as_str(),
            "http://localhost:8080/birds/?q=robin&seasons=SPRING&seasons=WINTER"
        );
    }

    #[test]
    fn test_prepare_attaches_bearer() {
        let spec = RequestSpec::get("/user/me");
        let prepared = prepare(&base(), &spec, Some("tok")).unwrap();
        assert_eq!(prepared.headers.get("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_prepare_without_token_has_no_auth_header() {
        let spec = RequestSpec::get("/birds/");
        let prepared = prepare(&base(), &spec, None).unwrap();
        assert!(!prepared.headers.contains("authorization"));
    }
}
