//! Typed wrappers over the service REST surface
//!
//! Each service builds request descriptors, sends them through the
//! right client (public or authenticated), and decodes the JSON
//! responses into domain types.

mod auth_api;
mod birds;
mod sightings;
mod users;

pub use auth_api::{AuthApi, KakaoLogin};
pub use birds::BirdService;
pub use sightings::SightingService;
pub use users::{NicknameUpdate, UserService};
