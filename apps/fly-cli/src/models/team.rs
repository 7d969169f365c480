//! Team wire model
//!
//! The same structs are sent to the API as JSON and handed to the diff
//! renderer, so field order here is the order fields are displayed in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A team and the auth methods configured for it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_auth: Option<GitHubAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uaa_auth: Option<UaaAuth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub basic_auth_username: String,
    pub basic_auth_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubAuth {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub teams: Vec<GitHubTeam>,
    #[serde(default)]
    pub users: Vec<String>,
}

/// A GitHub team, given on the command line as `ORG/TEAM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubTeam {
    pub organization_name: String,
    pub team_name: String,
}

impl FromStr for GitHubTeam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [org, team] if !org.is_empty() && !team.is_empty() => Ok(Self {
                organization_name: org.to_string(),
                team_name: team.to_string(),
            }),
            _ => Err(format!("malformed GitHub team specification: {s}")),
        }
    }
}

impl fmt::Display for GitHubTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization_name, self.team_name)
    }
}

/// CF/UAA OAuth configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UaaAuth {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub cf_spaces: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub cf_url: String,
}
