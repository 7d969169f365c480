//! Ordered flattening and redacted rendering of a single snapshot
//!
//! Snapshots go through `serde_yaml::Value`, whose mappings keep insertion
//! order, so struct fields come out in declaration order and parsed YAML in
//! document order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;

use serde::Serialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use super::sensitive::SensitiveFieldSet;
use super::{DiffError, RenderResult};

/// Written in place of the value of every sensitive field
pub const REDACTED_MARKER: &str = "<redacted>";

const INDENT: &str = "  ";

/// One rendered line plus what it is compared by
///
/// Redacted lines carry a digest of the hidden value so that two
/// `<redacted>` lines only compare equal when the values behind them do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedLine {
    pub(crate) text: String,
    digest: Option<u64>,
}

impl RenderedLine {
    pub(crate) fn plain(text: String) -> Self {
        Self { text, digest: None }
    }

    fn redacted(text: String, value: &Value) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self {
            text,
            digest: Some(hasher.finish()),
        }
    }
}

/// One version of a configuration as an ordered field list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    fields: Mapping,
}

impl Snapshot {
    /// Flatten any serializable value
    ///
    /// `null` (e.g. a unit struct) is an empty snapshot; any other
    /// non-mapping value is a serialization error.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> RenderResult<Self> {
        let value =
            serde_yaml::to_value(value).map_err(|e| DiffError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a snapshot from an already parsed YAML value
    pub fn from_value(value: Value) -> RenderResult<Self> {
        match value {
            Value::Mapping(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            Value::Tagged(tagged) => {
                let TaggedValue { value, .. } = *tagged;
                Self::from_value(value)
            }
            other => Err(DiffError::Serialization(format!(
                "expected a mapping of fields, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// True when the snapshot has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Top-level field names in natural order
    pub fn field_names(&self) -> RenderResult<Vec<String>> {
        self.fields.keys().map(key_text).collect()
    }

    /// Render every field to a line, without a label and without the
    /// leading indentation of the top level
    pub fn render_lines(&self, policy: &SensitiveFieldSet) -> RenderResult<Vec<String>> {
        Ok(self
            .keyed_lines(policy)?
            .into_iter()
            .map(|line| line.text)
            .collect())
    }

    /// Rendered lines paired with what they are compared by
    pub(crate) fn keyed_lines(
        &self,
        policy: &SensitiveFieldSet,
    ) -> RenderResult<Vec<RenderedLine>> {
        let mut lines = Vec::new();
        render_mapping(&self.fields, 0, policy, &mut lines)?;
        Ok(lines)
    }

    /// Write the label on its own line followed by the indented field lines
    ///
    /// Lines are built before anything is written, so a serialization error
    /// leaves the sink untouched.
    pub fn render<W: Write + ?Sized>(
        &self,
        out: &mut W,
        label: &str,
        policy: &SensitiveFieldSet,
    ) -> RenderResult<()> {
        let lines = self.render_lines(policy)?;
        writeln!(out, "{label}")?;
        for line in &lines {
            if line.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, "{INDENT}{line}")?;
            }
        }
        Ok(())
    }
}

fn render_mapping(
    fields: &Mapping,
    depth: usize,
    policy: &SensitiveFieldSet,
    lines: &mut Vec<RenderedLine>,
) -> RenderResult<()> {
    let indent = INDENT.repeat(depth);
    for (key, value) in fields {
        let name = key_text(key)?;
        if policy.is_sensitive(&name) {
            lines.push(RenderedLine::redacted(
                format!("{indent}{name} : {REDACTED_MARKER}"),
                value,
            ));
            continue;
        }
        render_entry(format!("{indent}{name} :"), value, depth, policy, lines)?;
    }
    Ok(())
}

fn render_sequence(
    items: &[Value],
    depth: usize,
    policy: &SensitiveFieldSet,
    lines: &mut Vec<RenderedLine>,
) -> RenderResult<()> {
    let indent = INDENT.repeat(depth);
    for item in items {
        render_entry(format!("{indent}-"), item, depth, policy, lines)?;
    }
    Ok(())
}

/// Render one value after its head (`name :` or `-`); nested children go one
/// level deeper than `depth`
fn render_entry(
    head: String,
    value: &Value,
    depth: usize,
    policy: &SensitiveFieldSet,
    lines: &mut Vec<RenderedLine>,
) -> RenderResult<()> {
    match value {
        Value::Tagged(tagged) => render_entry(head, &tagged.value, depth, policy, lines),
        Value::Mapping(fields) if fields.is_empty() => {
            lines.push(RenderedLine::plain(format!("{head} {{}}")));
            Ok(())
        }
        Value::Mapping(fields) => {
            lines.push(RenderedLine::plain(head));
            render_mapping(fields, depth + 1, policy, lines)
        }
        Value::Sequence(items) if items.is_empty() => {
            lines.push(RenderedLine::plain(format!("{head} []")));
            Ok(())
        }
        Value::Sequence(items) => {
            lines.push(RenderedLine::plain(head));
            render_sequence(items, depth + 1, policy, lines)
        }
        scalar => {
            let text = scalar_text(scalar);
            if text.contains('\n') {
                render_block(head, &text, depth + 1, lines);
            } else {
                lines.push(RenderedLine::plain(format!("{head} {text}")));
            }
            Ok(())
        }
    }
}

/// Multi-line strings as a literal block
///
/// The chomping indicator records trailing newlines: `|-` for none, `|` for
/// one, `|+` for more, with one empty line per extra newline.
fn render_block(head: String, text: &str, depth: usize, lines: &mut Vec<RenderedLine>) {
    let body = text.trim_end_matches('\n');
    let trailing = text.len() - body.len();
    let indicator = match trailing {
        0 => "|-",
        1 => "|",
        _ => "|+",
    };
    lines.push(RenderedLine::plain(format!("{head} {indicator}")));

    let indent = INDENT.repeat(depth);
    for line in body.split('\n') {
        if line.is_empty() {
            lines.push(RenderedLine::plain(String::new()));
        } else {
            lines.push(RenderedLine::plain(format!("{indent}{line}")));
        }
    }
    for _ in 1..trailing {
        lines.push(RenderedLine::plain(String::new()));
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

fn key_text(key: &Value) -> RenderResult<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(scalar_text(key)),
        Value::Tagged(tagged) => key_text(&tagged.value),
        other => Err(DiffError::Serialization(format!(
            "field names must be scalars, found {}",
            value_kind(other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
