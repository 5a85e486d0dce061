//! HTTP request descriptor types
//!
//! A [`RequestSpec`] describes one call against the service API in
//! terms of method, service-relative path, query, headers, and body.
//! [`Attempt`] wraps a descriptor with its dispatch count so the retry
//! path of the authenticated client carries no mutable protocol state.

mod attempt;
mod body;
mod header;
mod method;
mod query;
mod spec;

pub use attempt::Attempt;
pub use body::RequestBody;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::QueryParams;
pub use spec::{RequestSpec, DEFAULT_TIMEOUT_MS};
