//! Configuration management for the fly CLI

mod flyrc;
mod paths;

pub use flyrc::{Flyrc, Target, TargetProps, TargetToken};
pub use paths::ConfigPaths;

/// Name of the rc file holding saved targets
pub const RC_FILE_NAME: &str = ".flyrc";
