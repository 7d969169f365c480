//! Logger configuration from CLI flags and environment

use std::io::IsTerminal;
use std::path::PathBuf;

use super::level::LogLevel;

/// Resolved logging settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Suppresses every diagnostic level
    pub quiet: bool,
    /// Append diagnostics to this file as well
    pub log_file: Option<PathBuf>,
    /// Colourize terminal diagnostics
    pub color: bool,
}

impl LogConfig {
    /// Combine flags with `FLY_VERBOSE`, `FLY_DEBUG` and `FLY_TRACE`
    ///
    /// An env var enables its level when set to anything but `0` or `false`.
    /// `quiet` wins over every level.
    pub fn from_args_and_env(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_file: Option<PathBuf>,
    ) -> Self {
        let level = LogLevel::from_flags(
            verbose || env_flag("FLY_VERBOSE"),
            debug || env_flag("FLY_DEBUG"),
            trace || env_flag("FLY_TRACE"),
        );

        Self {
            level,
            quiet,
            log_file,
            color: std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal(),
        }
    }

    fn effective(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Normal
        } else {
            self.level
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.effective().is_verbose()
    }

    pub fn is_debug(&self) -> bool {
        self.effective().is_debug()
    }

    pub fn is_trace(&self) -> bool {
        self.effective().is_trace()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| !matches!(value.trim(), "" | "0" | "false"))
        .unwrap_or(false)
}
