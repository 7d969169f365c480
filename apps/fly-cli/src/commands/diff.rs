//! Compare two YAML documents with sensitive values redacted
//!
//! ```bash
//! fly diff team-before.yml team-after.yml
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_yaml::Value;

use crate::config::{ConfigPaths, Flyrc};
use crate::diff::{has_line_changes, write_diff, Diff, SensitiveFieldSet};
use crate::error::{CliError, CliResult};
use crate::verbose;

/// Compare two YAML files
#[derive(Args, Debug)]
#[command(after_help = "EXIT CODES:
    0  No differences found
    1  Differences detected (or an error occurred)

Fields whose names match the sensitive set (password, secret, token,
private_key, plus redact_fields from .flyrc) are shown as <redacted>.
")]
pub struct DiffArgs {
    /// The earlier version
    #[arg(value_name = "BEFORE")]
    pub before: PathBuf,

    /// The later version
    #[arg(value_name = "AFTER")]
    pub after: PathBuf,

    /// Header line printed above the diff
    #[arg(short = 'l', long)]
    pub label: Option<String>,
}

impl DiffArgs {
    fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            format!("{} -> {}", self.before.display(), self.after.display())
        })
    }
}

/// Execute the diff command
pub async fn execute(args: DiffArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let policy = Flyrc::load(&paths)?.sensitive_fields();

    let changed = compare_files(&args, &policy, &mut io::stdout().lock())?;
    if changed {
        std::process::exit(1);
    }
    Ok(())
}

/// Render the diff of two files into `out`; true when they differ
pub fn compare_files<W: io::Write>(
    args: &DiffArgs,
    policy: &SensitiveFieldSet,
    out: &mut W,
) -> CliResult<bool> {
    let before = load_yaml(&args.before)?;
    let after = load_yaml(&args.after)?;

    let lines = Diff::new(before, after).lines(policy)?;
    write_diff(out, &args.label(), &lines)?;

    let changed = has_line_changes(&lines);
    verbose!("Documents {}", if changed { "differ" } else { "match" });
    Ok(changed)
}

fn load_yaml(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&content)
        .map_err(|e| CliError::InputError(format!("Invalid YAML in {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn args(before: PathBuf, after: PathBuf, label: Option<&str>) -> DiffArgs {
        DiffArgs {
            before,
            after,
            label: label.map(str::to_string),
        }
    }

    fn run(args: &DiffArgs) -> (bool, String) {
        let mut out = Vec::new();
        let changed = compare_files(args, &SensitiveFieldSet::builtin(), &mut out).unwrap();
        (changed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_identical_files_report_no_changes() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "host: example.com\npassword: same\n");
        let b = write(&dir, "b.yml", "host: example.com\npassword: same\n");

        let (changed, output) = run(&args(a, b, Some("cfg")));

        assert!(!changed);
        assert_eq!(output, "cfg\n  host : example.com\n  password : <redacted>\n");
    }

    #[test]
    fn test_secret_only_change_is_detected() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "host: a\npassword: old\n");
        let b = write(&dir, "b.yml", "host: a\npassword: new\n");

        let (changed, output) = run(&args(a, b, Some("cfg")));

        assert!(changed);
        assert_eq!(
            output,
            "cfg\n  host : a\n- password : <redacted>\n+ password : <redacted>\n"
        );
    }

    #[test]
    fn test_changed_field_is_marked() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "host: old\n");
        let b = write(&dir, "b.yml", "host: new\n");

        let (changed, output) = run(&args(a, b, Some("cfg")));

        assert!(changed);
        assert!(output.contains("- host : old\n"));
        assert!(output.contains("+ host : new\n"));
    }

    #[test]
    fn test_default_label_names_both_files() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "x: 1\n");
        let b = write(&dir, "b.yml", "x: 1\n");
        let label = args(a.clone(), b.clone(), None).label();
        assert_eq!(label, format!("{} -> {}", a.display(), b.display()));
    }

    #[test]
    fn test_empty_file_is_an_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "");
        let b = write(&dir, "b.yml", "token: abc\n");

        let (changed, output) = run(&args(a, b, Some("cfg")));

        assert!(changed);
        assert_eq!(output, "cfg\n+ token : <redacted>\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "x: 1\n");
        let mut out = Vec::new();
        let result = compare_files(
            &args(a, dir.path().join("missing.yml"), None),
            &SensitiveFieldSet::builtin(),
            &mut out,
        );
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_non_mapping_document_is_render_error() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.yml", "- 1\n- 2\n");
        let b = write(&dir, "b.yml", "x: 1\n");
        let mut out = Vec::new();
        let result = compare_files(&args(a, b, None), &SensitiveFieldSet::builtin(), &mut out);
        assert!(matches!(result, Err(CliError::Render(_))));
    }
}
