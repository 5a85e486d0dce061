//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and
//! external systems. Each port is a trait implemented by an adapter
//! in the infrastructure layer.

mod clock;
mod http;
mod kv_store;
mod token_store;

pub use clock::Clock;
pub use http::{HttpTransport, TransportBody, TransportError, TransportRequest};
pub use kv_store::{KeyValueError, KeyValueStore};
pub use token_store::{TokenStore, TokenStoreError};
