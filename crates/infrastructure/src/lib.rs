//! Fieldfare Infrastructure - concrete adapters
//!
//! Implementations of the application ports: a reqwest-backed
//! transport, token and key-value persistence, the system clock, and
//! the presigned image uploader.

pub mod adapters;
pub mod persistence;
pub mod upload;

pub use adapters::{ReqwestTransport, SystemClock};
pub use persistence::{FileKeyValueStore, FileTokenStore, MemoryTokenStore};
pub use upload::{PresignedUploader, UploadError};
