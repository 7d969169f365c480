//! Team API operations

use reqwest::StatusCode;

use super::client::{response_error, ApiClient};
use crate::error::{CliError, CliResult};
use crate::models::Team;

/// Result of a create-or-update call
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTeam {
    pub team: Team,
    /// True when the server created the team, false when it updated it
    pub created: bool,
}

fn team_url(client: &ApiClient, name: &str) -> String {
    client.url(&format!("/api/v1/teams/{}", urlencoding::encode(name)))
}

/// Fetch a team by name; `None` when the server does not know it
pub async fn get_team(client: &ApiClient, name: &str) -> CliResult<Option<Team>> {
    let response = client.get_authenticated(&team_url(client, name)).await?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => {
            let team: Team = response
                .json()
                .await
                .map_err(|e| CliError::Server(format!("Invalid team response: {}", e)))?;
            Ok(Some(team))
        }
        _ => Err(response_error(response, "Failed to fetch team").await),
    }
}

/// Create the team, or replace its auth configuration if it exists
pub async fn create_or_update_team(client: &ApiClient, team: &Team) -> CliResult<SavedTeam> {
    let response = client.put_json(&team_url(client, &team.name), team).await?;
    let status = response.status();

    if status == StatusCode::BAD_REQUEST {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::Validation(format!(
            "Invalid team configuration: {}",
            body.trim()
        )));
    }

    if !status.is_success() {
        return Err(response_error(response, "Failed to save team").await);
    }

    // Older servers answer with an empty body
    let body = response.text().await?;
    let saved = if body.trim().is_empty() {
        team.clone()
    } else {
        serde_json::from_str(&body)
            .map_err(|e| CliError::Server(format!("Invalid team response: {}", e)))?
    };

    Ok(SavedTeam {
        team: saved,
        created: status == StatusCode::CREATED,
    })
}
