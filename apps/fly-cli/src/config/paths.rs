//! Location of the rc file

use crate::error::{CliError, CliResult};
use std::path::PathBuf;

use super::RC_FILE_NAME;

/// Configuration paths for the fly CLI
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Directory holding the rc file (the home directory by default)
    pub config_dir: PathBuf,
    /// Path to .flyrc
    pub rc_file: PathBuf,
}

impl ConfigPaths {
    /// Resolve paths, respecting the FLY_CONFIG_DIR env var
    pub fn new() -> CliResult<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self::in_dir(config_dir))
    }

    /// Paths rooted at an explicit directory
    pub fn in_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            rc_file: config_dir.join(RC_FILE_NAME),
            config_dir,
        }
    }

    fn get_config_dir() -> CliResult<PathBuf> {
        if let Ok(dir) = std::env::var("FLY_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))
    }
}
