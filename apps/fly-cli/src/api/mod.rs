//! API client modules for the CI server

mod client;
mod teams;

pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use teams::{create_or_update_team, get_team, SavedTeam};
