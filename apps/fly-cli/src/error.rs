//! CLI error types and exit codes

use thiserror::Error;

use crate::diff::DiffError;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication required
/// - 3: Network error
/// - 4: Validation error
/// - 5: Server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Not logged in to target '{0}'.")]
    NotAuthenticated(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection failed: {0}\n\nTroubleshooting:\n  - Check that the target API URL is reachable\n  - Try again in a few moments")]
    ConnectionFailed(String),

    #[error("{0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("bailing out")]
    Aborted,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotAuthenticated(_) | CliError::AuthenticationFailed(_) => 2,
            CliError::Network(_) | CliError::ConnectionFailed(_) => 3,
            CliError::Validation(_) => 4,
            CliError::Server(_) => 5,
            CliError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
            CliError::UnknownTarget(_)
            | CliError::Config(_)
            | CliError::Io(_)
            | CliError::InputError(_)
            | CliError::Render(_)
            | CliError::Aborted => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31merror:\x1b[0m {}", self);
        } else {
            eprintln!("error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            eprintln!("\n{}", suggestion);
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::UnknownTarget(_) => {
                Some("Run 'fly targets' to list the targets saved in your .flyrc.")
            }
            CliError::NotAuthenticated(_) => {
                Some("Log in to the target first so that a token is saved in your .flyrc.")
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            CliError::ConnectionFailed(e.to_string())
        } else if e.is_timeout() {
            CliError::Network("Request timed out".to_string())
        } else {
            CliError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(format!("JSON error: {}", e))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Config(format!("YAML error: {}", e))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::InputError(format!("Dialog error: {}", e))
    }
}

impl From<DiffError> for CliError {
    fn from(e: DiffError) -> Self {
        match e {
            DiffError::Write(io) => CliError::Io(io.to_string()),
            DiffError::Serialization(message) => CliError::Render(message),
        }
    }
}
