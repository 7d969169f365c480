//! Integration tests for redacted snapshot and diff rendering
//!
//! These tests drive the renderer through its public API only:
//! - Sensitive values never reach the sink
//! - Non-sensitive fields are rendered verbatim and in declaration order
//! - Rendering is repeatable byte for byte

use fly_cli::diff::{Diff, DiffError, SensitiveFieldSet, Snapshot, REDACTED_MARKER};
use fly_cli::models::{BasicAuth, GitHubAuth, GitHubTeam, Team};
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct Endpoint {
    host: String,
    password: String,
}

#[derive(Debug, Clone, Serialize)]
struct Named {
    name: String,
}

#[derive(Debug, Serialize)]
struct Empty {}

fn render_snapshot<T: Serialize>(value: &T, label: &str, policy: &SensitiveFieldSet) -> String {
    let mut buffer = Vec::new();
    Snapshot::from_serialize(value)
        .unwrap()
        .render(&mut buffer, label, policy)
        .unwrap();
    String::from_utf8(buffer).unwrap()
}

fn render_diff<T: Serialize>(diff: &Diff<T>, label: &str, policy: &SensitiveFieldSet) -> String {
    let mut buffer = Vec::new();
    diff.render_with(&mut buffer, label, policy).unwrap();
    String::from_utf8(buffer).unwrap()
}

fn team_with_github(secret: &str) -> Team {
    Team {
        name: "main".to_string(),
        basic_auth: Some(BasicAuth {
            basic_auth_username: "admin".to_string(),
            basic_auth_password: "hunter2".to_string(),
        }),
        github_auth: Some(GitHubAuth {
            client_id: "gh-client".to_string(),
            client_secret: secret.to_string(),
            organizations: vec!["my-org".to_string()],
            teams: vec![GitHubTeam {
                organization_name: "my-org".to_string(),
                team_name: "devs".to_string(),
            }],
            users: vec![],
        }),
        uaa_auth: None,
    }
}

// ============================================================================
// Redaction
// ============================================================================

#[test]
fn test_configured_name_field_is_redacted() {
    let diff = Diff::new(
        Named {
            name: "beforeName".to_string(),
        },
        Named {
            name: "afterName".to_string(),
        },
    );
    let policy = SensitiveFieldSet::builtin().with_exact("name");

    let output = render_diff(&diff, "someLabel", &policy);

    assert!(output.contains("name : <redacted>"));
    assert!(!output.contains("beforeName"));
    assert!(!output.contains("afterName"));
}

#[test]
fn test_password_redacted_host_verbatim() {
    let endpoint = Endpoint {
        host: "example.com".to_string(),
        password: "s3cret".to_string(),
    };

    let output = render_snapshot(&endpoint, "endpoint", &SensitiveFieldSet::builtin());

    assert!(output.contains("host : example.com"));
    assert!(output.contains(&format!("password : {}", REDACTED_MARKER)));
    assert!(!output.contains("s3cret"));
}

#[test]
fn test_nested_team_secrets_never_rendered() {
    let diff = Diff::new(
        Some(team_with_github("old-secret")),
        Some(team_with_github("new-secret")),
    );

    let output = render_diff(&diff, "team main", &SensitiveFieldSet::builtin());

    assert!(!output.contains("hunter2"));
    assert!(!output.contains("old-secret"));
    assert!(!output.contains("new-secret"));
    assert!(output.contains("  basic_auth_password : <redacted>"));
    assert!(output.contains("-   client_secret : <redacted>"));
    assert!(output.contains("+   client_secret : <redacted>"));
    assert!(output.contains("team_name : devs"));
    assert!(diff.has_changes(&SensitiveFieldSet::builtin()).unwrap());
}

#[test]
fn test_unchanged_secret_is_not_marked() {
    let diff = Diff::new(
        Some(team_with_github("same-secret")),
        Some(team_with_github("same-secret")),
    );

    let output = render_diff(&diff, "team main", &SensitiveFieldSet::builtin());

    assert!(!output.lines().any(|l| l.starts_with('-') || l.starts_with('+')));
    assert!(!diff.has_changes(&SensitiveFieldSet::builtin()).unwrap());
}

#[test]
fn test_sensitive_mapping_hides_whole_subtree() {
    let team = team_with_github("abc");
    let policy = SensitiveFieldSet::empty().with_exact("github_auth");

    let output = render_snapshot(&team, "team", &policy);

    assert!(output.contains("  github_auth : <redacted>\n"));
    assert!(!output.contains("gh-client"));
    assert!(!output.contains("my-org"));
}

// ============================================================================
// Layout and ordering
// ============================================================================

#[test]
fn test_fields_follow_declaration_order() {
    let output = render_snapshot(
        &team_with_github("x"),
        "team main",
        &SensitiveFieldSet::builtin(),
    );
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "team main");
    assert_eq!(lines[1], "  name : main");
    assert_eq!(lines[2], "  basic_auth :");
    assert_eq!(lines[3], "    basic_auth_username : admin");
    assert_eq!(lines[4], "    basic_auth_password : <redacted>");
    assert_eq!(lines[5], "  github_auth :");
    assert_eq!(lines[6], "    client_id : gh-client");
}

#[test]
fn test_empty_snapshot_renders_only_label() {
    let output = render_snapshot(&Empty {}, "nothing here", &SensitiveFieldSet::builtin());
    assert_eq!(output, "nothing here\n");
}

#[test]
fn test_new_team_is_all_additions() {
    let after = Team {
        name: "main".to_string(),
        ..Team::default()
    };
    let diff = Diff::new(None, Some(after));

    let output = render_diff(&diff, "team main", &SensitiveFieldSet::builtin());

    assert_eq!(output, "team main\n+ name : main\n");
}

#[test]
fn test_render_is_byte_identical_across_runs() {
    let diff = Diff::new(Some(team_with_github("a")), None);
    let policy = SensitiveFieldSet::builtin();

    let first = render_diff(&diff, "team main", &policy);
    let second = render_diff(&diff, "team main", &policy);

    assert_eq!(first, second);
}

#[test]
fn test_shared_diff_renders_from_threads() {
    let diff = Arc::new(Diff::new(
        Some(team_with_github("a")),
        Some(team_with_github("b")),
    ));
    let expected = render_diff(&*diff, "team main", &SensitiveFieldSet::builtin());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let diff = Arc::clone(&diff);
            std::thread::spawn(move || {
                render_diff(&*diff, "team main", &SensitiveFieldSet::builtin())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_scalar_snapshot_is_rejected() {
    let result = Snapshot::from_serialize(&42);
    assert!(matches!(result, Err(DiffError::Serialization(_))));
}
