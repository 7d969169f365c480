//! CLI command implementations

pub mod diff;
pub mod set_team;
pub mod targets;
