//! List saved targets

use clap::Args;
use serde::Serialize;

use crate::config::{ConfigPaths, Flyrc};
use crate::error::CliResult;
use crate::output::print_info;

/// List the targets saved in .flyrc
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the targets command
pub async fn execute(args: TargetsArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let rc = Flyrc::load(&paths)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries(&rc))?);
        return Ok(());
    }

    if rc.targets.is_empty() {
        print_info(&format!(
            "No targets saved in {}",
            paths.rc_file.display()
        ));
        return Ok(());
    }

    for line in format_targets(&rc) {
        println!("{line}");
    }
    Ok(())
}

/// Target fields safe to print; tokens are never included
#[derive(Debug, Serialize, PartialEq)]
pub struct TargetSummary<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub team: &'a str,
}

pub fn summaries(rc: &Flyrc) -> Vec<TargetSummary<'_>> {
    rc.targets
        .iter()
        .map(|(name, props)| TargetSummary {
            name,
            url: &props.api,
            team: &props.team,
        })
        .collect()
}

/// One aligned line per target, sorted by name, with a header
pub fn format_targets(rc: &Flyrc) -> Vec<String> {
    let width = rc
        .targets
        .keys()
        .map(|name| name.len())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{:<width$}  {}  {}", "name", "url", "team")];
    // BTreeMap keeps names sorted
    for (name, props) in &rc.targets {
        let team = if props.team.is_empty() { "-" } else { props.team.as_str() };
        lines.push(format!("{:<width$}  {}  {}", name, props.api, team));
    }
    lines
}
