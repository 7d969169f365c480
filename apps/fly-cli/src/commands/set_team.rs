//! Create or modify a team's authentication configuration
//!
//! # Usage
//!
//! ```bash
//! fly -t ci set-team -n main \
//!     --github-auth-client-id ID --github-auth-client-secret SECRET \
//!     --github-auth-organization my-org
//! ```

use std::io::{self, Write};

use clap::Args;

use crate::api::{create_or_update_team, get_team, ApiClient, SavedTeam};
use crate::config::{ConfigPaths, Flyrc};
use crate::diff::Diff;
use crate::error::{CliError, CliResult};
use crate::interactive::{prompt_confirm, require_interactive};
use crate::models::{BasicAuth, GitHubAuth, GitHubTeam, Team, UaaAuth};
use crate::output::{print_success, print_warning, status_label};
use crate::verbose;

/// Create or modify a team
#[derive(Args, Debug, Clone)]
#[command(after_help = "EXAMPLES:
    # Basic auth
    fly -t ci set-team -n main --basic-auth-username admin --basic-auth-password s3cret

    # GitHub auth for an organization and a team
    fly -t ci set-team -n main \\
        --github-auth-client-id ID --github-auth-client-secret SECRET \\
        --github-auth-organization my-org --github-auth-team my-org/devs

    # Skip the confirmation prompt
    fly -t ci set-team -n main --basic-auth-username admin --basic-auth-password s3cret --non-interactive
")]
pub struct SetTeamArgs {
    /// The team to create or modify
    #[arg(short = 'n', long = "team-name", value_name = "NAME")]
    pub team_name: String,

    #[command(flatten)]
    pub basic_auth: BasicAuthFlags,

    #[command(flatten)]
    pub github_auth: GitHubAuthFlags,

    #[command(flatten)]
    pub cf_auth: CfAuthFlags,

    /// Apply the configuration without asking for confirmation
    #[arg(long)]
    pub non_interactive: bool,
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Basic Authentication")]
pub struct BasicAuthFlags {
    /// Username to use for basic auth
    #[arg(long = "basic-auth-username", value_name = "USERNAME")]
    pub username: Option<String>,

    /// Password to use for basic auth
    #[arg(long = "basic-auth-password", value_name = "PASSWORD")]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "GitHub Authentication")]
pub struct GitHubAuthFlags {
    /// Application client ID for enabling GitHub OAuth
    #[arg(
        id = "github_auth_client_id",
        long = "github-auth-client-id",
        value_name = "ID"
    )]
    pub client_id: Option<String>,

    /// Application client secret for enabling GitHub OAuth
    #[arg(
        id = "github_auth_client_secret",
        long = "github-auth-client-secret",
        value_name = "SECRET"
    )]
    pub client_secret: Option<String>,

    /// GitHub organization whose members will have access
    #[arg(long = "github-auth-organization", value_name = "ORG")]
    pub organizations: Vec<String>,

    /// GitHub team whose members will have access
    #[arg(long = "github-auth-team", value_name = "ORG/TEAM")]
    pub teams: Vec<GitHubTeam>,

    /// GitHub user to permit access
    #[arg(long = "github-auth-user", value_name = "LOGIN")]
    pub users: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "CF Authentication")]
pub struct CfAuthFlags {
    /// Application client ID for enabling UAA OAuth
    #[arg(
        id = "cf_auth_client_id",
        long = "cf-auth-client-id",
        value_name = "ID"
    )]
    pub client_id: Option<String>,

    /// Application client secret for enabling UAA OAuth
    #[arg(
        id = "cf_auth_client_secret",
        long = "cf-auth-client-secret",
        value_name = "SECRET"
    )]
    pub client_secret: Option<String>,

    /// Space GUID for a CF space whose developers will have access
    #[arg(long = "cf-auth-space", value_name = "GUID")]
    pub spaces: Vec<String>,

    /// UAA AuthURL endpoint
    #[arg(long = "cf-auth-auth-url", value_name = "URL")]
    pub auth_url: Option<String>,

    /// UAA TokenURL endpoint
    #[arg(long = "cf-auth-token-url", value_name = "URL")]
    pub token_url: Option<String>,

    /// CF API endpoint
    #[arg(long = "cf-auth-api-url", value_name = "URL")]
    pub api_url: Option<String>,
}

/// Auth methods enabled by the given flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthMethods {
    pub basic: bool,
    pub github: bool,
    pub cf: bool,
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn value(flag: &Option<String>) -> String {
    flag.clone().unwrap_or_default()
}

impl BasicAuthFlags {
    fn is_configured(&self) -> bool {
        is_set(&self.username) || is_set(&self.password)
    }

    fn validate(&self) -> CliResult<()> {
        if !is_set(&self.username) || !is_set(&self.password) {
            return Err(CliError::Validation(
                "Both username and password are required for basic auth.".to_string(),
            ));
        }
        Ok(())
    }
}

impl GitHubAuthFlags {
    fn is_configured(&self) -> bool {
        is_set(&self.client_id)
            || is_set(&self.client_secret)
            || !self.organizations.is_empty()
            || !self.teams.is_empty()
            || !self.users.is_empty()
    }

    fn validate(&self) -> CliResult<()> {
        if !is_set(&self.client_id) || !is_set(&self.client_secret) {
            return Err(CliError::Validation(
                "Both client-id and client-secret are required for github-auth.".to_string(),
            ));
        }
        if self.organizations.is_empty() && self.teams.is_empty() && self.users.is_empty() {
            return Err(CliError::Validation(
                "At least one of the following is required for github-auth: organizations, teams, users"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl CfAuthFlags {
    fn is_configured(&self) -> bool {
        is_set(&self.client_id)
            || is_set(&self.client_secret)
            || !self.spaces.is_empty()
            || is_set(&self.auth_url)
            || is_set(&self.token_url)
            || is_set(&self.api_url)
    }

    fn validate(&self) -> CliResult<()> {
        if !is_set(&self.client_id) || !is_set(&self.client_secret) {
            return Err(CliError::Validation(
                "Both client-id and client-secret are required for cf-auth.".to_string(),
            ));
        }
        if self.spaces.is_empty() {
            return Err(CliError::Validation(
                "space is required for cf-auth.".to_string(),
            ));
        }
        if !is_set(&self.auth_url) || !is_set(&self.token_url) || !is_set(&self.api_url) {
            return Err(CliError::Validation(
                "auth-url, token-url and api-url are required for cf-auth.".to_string(),
            ));
        }
        Ok(())
    }
}

impl SetTeamArgs {
    /// Check flag combinations and report which auth methods they enable
    pub fn validate_flags(&self) -> CliResult<AuthMethods> {
        let methods = AuthMethods {
            basic: self.basic_auth.is_configured(),
            github: self.github_auth.is_configured(),
            cf: self.cf_auth.is_configured(),
        };

        if methods.basic {
            self.basic_auth.validate()?;
        }
        if methods.github {
            self.github_auth.validate()?;
        }
        if methods.cf {
            self.cf_auth.validate()?;
        }

        Ok(methods)
    }

    /// The team the server should end up with
    pub fn build_team(&self, methods: AuthMethods) -> Team {
        let basic_auth = methods.basic.then(|| BasicAuth {
            basic_auth_username: value(&self.basic_auth.username),
            basic_auth_password: value(&self.basic_auth.password),
        });

        let github_auth = methods.github.then(|| GitHubAuth {
            client_id: value(&self.github_auth.client_id),
            client_secret: value(&self.github_auth.client_secret),
            organizations: self.github_auth.organizations.clone(),
            teams: self.github_auth.teams.clone(),
            users: self.github_auth.users.clone(),
        });

        let uaa_auth = methods.cf.then(|| UaaAuth {
            client_id: value(&self.cf_auth.client_id),
            client_secret: value(&self.cf_auth.client_secret),
            cf_spaces: self.cf_auth.spaces.clone(),
            auth_url: value(&self.cf_auth.auth_url),
            token_url: value(&self.cf_auth.token_url),
            cf_url: value(&self.cf_auth.api_url),
        });

        Team {
            name: self.team_name.clone(),
            basic_auth,
            github_auth,
            uaa_auth,
        }
    }
}

/// Execute the set-team command against the named target
pub async fn execute(args: SetTeamArgs, target_name: &str) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let saved = execute_with_paths(&args, target_name, &paths).await?;

    if saved.created {
        print_success("team created");
    } else {
        print_success("team updated");
    }
    Ok(())
}

/// Run set-team with an explicit rc file location
pub async fn execute_with_paths(
    args: &SetTeamArgs,
    target_name: &str,
    paths: &ConfigPaths,
) -> CliResult<SavedTeam> {
    let rc = Flyrc::load(paths)?;
    let target = rc.target(target_name)?;
    target.validate()?;

    let methods = args.validate_flags()?;

    println!("Team Name: {}", args.team_name);
    println!("Basic Auth: {}", status_label(methods.basic));
    println!("GitHub Auth: {}", status_label(methods.github));
    println!("CF Auth: {}", status_label(methods.cf));
    println!();

    if methods == AuthMethods::default() {
        print_warning("no auth methods configured; nobody will be able to log in to this team");
    }

    let client = ApiClient::new(&target)?;
    let team = args.build_team(methods);

    verbose!("Fetching current configuration of team {}", team.name);
    let current = get_team(&client, &team.name).await?;
    if current.is_none() {
        verbose!("Team {} does not exist yet", team.name);
    }

    {
        let diff = Diff::new(current, Some(team.clone()));
        let mut stdout = io::stdout().lock();
        diff.render_with(
            &mut stdout,
            &format!("team {}", team.name),
            &rc.sensitive_fields(),
        )?;
        writeln!(stdout)?;
    }

    if !args.non_interactive {
        require_interactive("--non-interactive")?;
        if !prompt_confirm("apply configuration?", false)? {
            return Err(CliError::Aborted);
        }
    }

    verbose!("Saving team {}", team.name);
    create_or_update_team(&client, &team).await
}
