//! Data models for the fly CLI

pub mod team;

pub use team::{BasicAuth, GitHubAuth, GitHubTeam, Team, UaaAuth};
