//! fly CLI library
//!
//! Modules are exposed for the `fly` binary and for integration tests.

pub mod api;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod output;
