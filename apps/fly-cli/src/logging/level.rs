//! Verbosity levels
//!
//! Levels are cumulative: Debug includes Verbose, Trace includes Debug.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Regular command output only
    #[default]
    Normal = 0,
    /// Progress messages
    Verbose = 1,
    /// HTTP method, URL, status and timing
    Debug = 2,
    /// Request and response bodies, redacted
    Trace = 3,
}

impl LogLevel {
    /// The highest level requested by the flags
    pub fn from_flags(verbose: bool, debug: bool, trace: bool) -> Self {
        match (verbose, debug, trace) {
            (_, _, true) => Self::Trace,
            (_, true, _) => Self::Debug,
            (true, _, _) => Self::Verbose,
            _ => Self::Normal,
        }
    }

    pub fn is_verbose(&self) -> bool {
        *self >= Self::Verbose
    }

    pub fn is_debug(&self) -> bool {
        *self >= Self::Debug
    }

    pub fn is_trace(&self) -> bool {
        *self >= Self::Trace
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Verbose => "VERBOSE",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_picks_highest() {
        assert_eq!(LogLevel::from_flags(false, false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(true, false, false), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(true, true, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(true, true, true), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(false, false, true), LogLevel::Trace);
    }

    #[test]
    fn test_levels_are_cumulative() {
        assert!(!LogLevel::Normal.is_verbose());
        assert!(LogLevel::Debug.is_verbose());
        assert!(LogLevel::Trace.is_debug());
        assert!(!LogLevel::Debug.is_trace());
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Verbose.to_string(), "VERBOSE");
        assert_eq!(LogLevel::default().to_string(), "NORMAL");
    }
}
