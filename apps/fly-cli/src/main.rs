//! fly - command-line interface for a CI server
//!
//! - Create and modify teams and their authentication methods
//! - Compare configuration files with secrets redacted
//! - List saved targets

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fly_cli::commands;
use fly_cli::error::{CliError, CliResult};
use fly_cli::logging::{self, LogConfig};
use fly_cli::output::print_warning;

/// fly - CI server command-line interface
#[derive(Parser)]
#[command(name = "fly")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Target name from .flyrc
    #[arg(short = 't', long, global = true, env = "FLY_TARGET")]
    target: Option<String>,

    /// Show progress messages
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Show HTTP requests and responses
    #[arg(long, global = true)]
    debug: bool,

    /// Show request and response bodies (redacted)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress diagnostics
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Also write diagnostics to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or modify a team to have the given credentials
    #[command(visible_alias = "st")]
    SetTeam(commands::set_team::SetTeamArgs),

    /// Compare two YAML files with sensitive fields redacted
    Diff(commands::diff::DiffArgs),

    /// List saved targets
    Targets(commands::targets::TargetsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_args_and_env(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_file.clone(),
    );
    if let Err(e) = logging::init_global_logger(log_config) {
        print_warning(&format!("diagnostics disabled: {e}"));
    }

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::SetTeam(args) => {
            let target = require_target(cli.target)?;
            commands::set_team::execute(args, &target).await
        }
        Commands::Diff(args) => commands::diff::execute(args).await,
        Commands::Targets(args) => commands::targets::execute(args).await,
    }
}

fn require_target(target: Option<String>) -> CliResult<String> {
    target.ok_or_else(|| {
        CliError::Validation("No target specified. Use -t/--target <NAME>.".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_team_parses_all_auth_groups() {
        let cli = Cli::try_parse_from([
            "fly",
            "-t",
            "ci",
            "set-team",
            "-n",
            "main",
            "--basic-auth-username",
            "admin",
            "--basic-auth-password",
            "s3cret",
            "--github-auth-client-id",
            "gh-id",
            "--github-auth-client-secret",
            "gh-secret",
            "--github-auth-organization",
            "my-org",
            "--github-auth-team",
            "my-org/devs",
            "--github-auth-user",
            "octocat",
            "--cf-auth-client-id",
            "cf-id",
            "--cf-auth-client-secret",
            "cf-secret",
            "--cf-auth-space",
            "space-guid",
            "--cf-auth-auth-url",
            "https://uaa.example.com/oauth/authorize",
            "--cf-auth-token-url",
            "https://uaa.example.com/oauth/token",
            "--cf-auth-api-url",
            "https://api.cf.example.com",
            "--non-interactive",
        ])
        .unwrap();

        assert_eq!(cli.target.as_deref(), Some("ci"));
        let Commands::SetTeam(args) = cli.command else {
            panic!("expected set-team");
        };

        let methods = args.validate_flags().unwrap();
        assert!(methods.basic && methods.github && methods.cf);
        assert!(args.non_interactive);

        let team = args.build_team(methods);
        let github = team.github_auth.unwrap();
        let uaa = team.uaa_auth.unwrap();
        assert_eq!(github.client_id, "gh-id");
        assert_eq!(github.client_secret, "gh-secret");
        assert_eq!(github.teams[0].to_string(), "my-org/devs");
        assert_eq!(uaa.client_id, "cf-id");
        assert_eq!(uaa.client_secret, "cf-secret");
        assert_eq!(uaa.cf_url, "https://api.cf.example.com");
    }

    #[test]
    fn test_set_team_alias_and_target_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fly",
            "st",
            "-n",
            "main",
            "-t",
            "ci",
            "--cf-auth-client-id",
            "cf-id",
        ])
        .unwrap();

        assert_eq!(cli.target.as_deref(), Some("ci"));
        let Commands::SetTeam(args) = cli.command else {
            panic!("expected set-team");
        };
        assert_eq!(args.cf_auth.client_id.as_deref(), Some("cf-id"));
        assert!(args.github_auth.client_id.is_none());
    }

    #[test]
    fn test_diff_takes_two_files() {
        let cli = Cli::try_parse_from(["fly", "diff", "a.yml", "b.yml", "--label", "cfg"]).unwrap();
        let Commands::Diff(args) = cli.command else {
            panic!("expected diff");
        };
        assert_eq!(args.label.as_deref(), Some("cfg"));
    }

    #[test]
    fn test_missing_target_is_validation_error() {
        let err = require_target(None).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
