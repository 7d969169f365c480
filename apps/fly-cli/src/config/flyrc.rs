//! Saved targets (`.flyrc`)
//!
//! ```yaml
//! targets:
//!   ci:
//!     api: https://ci.example.com
//!     team: main
//!     token:
//!       type: Bearer
//!       value: abc123
//! redact_fields: [owner]
//! ```

use std::collections::BTreeMap;
use std::fs;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::ConfigPaths;
use crate::diff::SensitiveFieldSet;
use crate::error::{CliError, CliResult};

/// Contents of the rc file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flyrc {
    #[serde(default)]
    pub targets: BTreeMap<String, TargetProps>,
    /// Extra field names, matched exactly, to redact in rendered diffs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redact_fields: Vec<String>,
}

/// A single saved target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProps {
    pub api: String,
    #[serde(default)]
    pub team: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TargetToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetToken {
    #[serde(rename = "type")]
    pub token_type: String,
    pub value: String,
}

impl Flyrc {
    /// Load the rc file; a missing file is an empty configuration
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        if !paths.rc_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&paths.rc_file).map_err(|e| {
            CliError::Io(format!(
                "Failed to read {}: {}",
                paths.rc_file.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse rc file contents
    pub fn parse(content: &str) -> CliResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| CliError::Config(format!("Invalid .flyrc: {}", e)))
    }

    /// Look up a target by name
    pub fn target(&self, name: &str) -> CliResult<Target> {
        self.targets
            .get(name)
            .cloned()
            .map(|props| Target {
                name: name.to_string(),
                props,
            })
            .ok_or_else(|| CliError::UnknownTarget(name.to_string()))
    }

    /// The redaction policy: built-in fragments plus `redact_fields`
    pub fn sensitive_fields(&self) -> SensitiveFieldSet {
        SensitiveFieldSet::builtin().with_exact_names(self.redact_fields.iter().cloned())
    }
}

/// A named target resolved from the rc file
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub props: TargetProps,
}

impl Target {
    /// Check that the target can be used for authenticated API calls
    pub fn validate(&self) -> CliResult<()> {
        self.api_url()?;
        self.token()?;
        Ok(())
    }

    /// The parsed API base URL
    pub fn api_url(&self) -> CliResult<Url> {
        let url = Url::parse(&self.props.api).map_err(|e| {
            CliError::Config(format!(
                "Target '{}' has an invalid API URL '{}': {}",
                self.name, self.props.api, e
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CliError::Config(format!(
                "Target '{}' uses unsupported scheme '{}'",
                self.name, other
            ))),
        }
    }

    /// The saved bearer token
    pub fn token(&self) -> CliResult<&str> {
        match &self.props.token {
            Some(token) if !token.value.is_empty() => Ok(&token.value),
            _ => Err(CliError::NotAuthenticated(self.name.clone())),
        }
    }
}
