//! Fieldfare Application - client pipeline and orchestration
//!
//! This crate holds the ports (interfaces) to the outside world and
//! everything between them and the domain: the public and
//! authenticated HTTP clients, the token-refresh protocol, the auth
//! session, the typed API services, and the client-side stores.

pub mod auth;
pub mod client;
pub mod error;
pub mod ports;
pub mod services;
pub mod stores;

pub use auth::{AuthEvents, AuthExpired, AuthSession, RefreshGate, RefreshSlot};
pub use client::{AuthClient, ClientConfig, PublicClient};
pub use error::{ApiError, ApiResult};
