//! Terminal and file writers for diagnostics

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use super::level::LogLevel;
use super::redaction::Redactor;

/// One diagnostic message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub context: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            context: context.into(),
            message: message.into(),
        }
    }
}

/// An HTTP exchange summary for debug output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpLogEntry {
    Request { method: String, url: String },
    Response { status: u16, elapsed_ms: u128 },
}

impl HttpLogEntry {
    pub fn format(&self) -> String {
        match self {
            HttpLogEntry::Request { method, url } => format!("→ {method} {url}"),
            HttpLogEntry::Response { status, elapsed_ms } => {
                format!("← {status} ({elapsed_ms}ms)")
            }
        }
    }

    fn color(&self) -> &'static str {
        match self {
            HttpLogEntry::Request { .. } => "\x1b[33m",
            HttpLogEntry::Response { status, .. } if (200..300).contains(status) => "\x1b[32m",
            HttpLogEntry::Response { status, .. } if *status >= 400 => "\x1b[31m",
            HttpLogEntry::Response { .. } => "\x1b[33m",
        }
    }
}

/// Writes diagnostics to stderr
#[derive(Debug, Clone, Copy)]
pub struct TerminalWriter {
    color: bool,
}

impl TerminalWriter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn format_entry(&self, entry: &LogEntry) -> String {
        if self.color {
            format!("\x1b[36m[{}]\x1b[0m {}", entry.context, entry.message)
        } else {
            format!("[{}] {}", entry.context, entry.message)
        }
    }

    pub fn format_http(&self, entry: &HttpLogEntry) -> String {
        let text = entry.format();
        if self.color {
            format!("{}{}\x1b[0m", entry.color(), text)
        } else {
            text
        }
    }

    pub fn write(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Appends timestamped, redacted diagnostics to a file
pub struct FileWriter {
    file: Mutex<File>,
}

impl FileWriter {
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn write_entry(&self, entry: &LogEntry, redactor: &Redactor) -> io::Result<()> {
        self.write_line(
            &entry.timestamp,
            entry.level.name(),
            &format!("[{}] {}", entry.context, redactor.redact(&entry.message)),
        )
    }

    pub fn write_http(&self, entry: &HttpLogEntry, redactor: &Redactor) -> io::Result<()> {
        self.write_line(&Local::now(), "HTTP", &redactor.redact(&entry.format()))
    }

    fn write_line(&self, timestamp: &DateTime<Local>, tag: &str, text: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        writeln!(file, "[{}] [{}] {}", timestamp.format("%Y-%m-%dT%H:%M:%S"), tag, text)?;
        file.flush()
    }
}
