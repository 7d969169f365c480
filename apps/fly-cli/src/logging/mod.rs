//! Verbose/debug diagnostics for the fly CLI
//!
//! - Verbosity levels (Normal, Verbose, Debug, Trace) from flags or
//!   `FLY_VERBOSE`, `FLY_DEBUG`, `FLY_TRACE`
//! - Diagnostics go to stderr, and optionally to a log file with timestamps
//! - Secrets in diagnostic text are redacted
//!
//! ```rust,ignore
//! let config = LogConfig::from_args_and_env(verbose, debug, trace, quiet, log_file);
//! logging::init_global_logger(config)?;
//! verbose!("Loading target {}", name);
//! ```

pub mod config;
pub mod level;
pub mod output;
pub mod redaction;

pub use config::LogConfig;
pub use level::LogLevel;
pub use output::{FileWriter, HttpLogEntry, LogEntry, TerminalWriter};
pub use redaction::{Redactor, REDACTED};

use std::io;
use std::sync::OnceLock;

/// Routes diagnostics to the terminal and the optional log file
pub struct Logger {
    config: LogConfig,
    terminal: TerminalWriter,
    file: Option<FileWriter>,
    redactor: Redactor,
}

impl Logger {
    pub fn new(config: LogConfig) -> io::Result<Self> {
        let file = config
            .log_file
            .as_deref()
            .map(FileWriter::new)
            .transpose()?;

        Ok(Self {
            terminal: TerminalWriter::new(config.color),
            config,
            file,
            redactor: Redactor::new(),
        })
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Log a progress message under a context label
    pub fn verbose(&self, context: &str, message: impl Into<String>) {
        if !self.config.is_verbose() {
            return;
        }

        let entry = LogEntry::new(LogLevel::Verbose, context, message);
        let redacted = LogEntry {
            message: self.redactor.redact(&entry.message).into_owned(),
            ..entry.clone()
        };
        self.terminal.write(&self.terminal.format_entry(&redacted));

        if let Some(file) = &self.file {
            let _ = file.write_entry(&entry, &self.redactor);
        }
    }

    /// Log an outgoing request at debug level
    pub fn debug_request(&self, method: &str, url: &str) {
        self.debug_http(HttpLogEntry::Request {
            method: method.to_string(),
            url: url.to_string(),
        });
    }

    /// Log a response status and timing at debug level
    pub fn debug_response(&self, status: u16, elapsed_ms: u128) {
        self.debug_http(HttpLogEntry::Response { status, elapsed_ms });
    }

    fn debug_http(&self, entry: HttpLogEntry) {
        if !self.config.is_debug() {
            return;
        }

        let line = self.terminal.format_http(&entry);
        self.terminal.write(&self.redactor.redact(&line));

        if let Some(file) = &self.file {
            let _ = file.write_http(&entry, &self.redactor);
        }
    }

    /// Log a request or response body at trace level, redacted
    pub fn trace_body(&self, label: &str, body: &str) {
        if !self.config.is_trace() {
            return;
        }

        let entry = LogEntry::new(LogLevel::Trace, label, body);
        let text = format!("[{}] {}", entry.context, self.redactor.redact(&entry.message));
        self.terminal.write(&text);

        if let Some(file) = &self.file {
            let _ = file.write_entry(&entry, &self.redactor);
        }
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger; fails if called twice
pub fn init_global_logger(config: LogConfig) -> io::Result<()> {
    let logger = Logger::new(config)?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| io::Error::other("Global logger already initialized"))
}

/// The process-wide logger, if installed
pub fn global_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Log a verbose message through the global logger
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if let Some(logger) = $crate::logging::global_logger() {
            logger.verbose(module_path!().rsplit("::").next().unwrap_or("fly"), format!($($arg)*));
        }
    };
}
