//! Labelled before/after rendering
//!
//! Both sides are redacted before they are written, so the values of
//! sensitive fields never appear in the output. Redacted lines still compare
//! by a digest of the hidden value, so a changed secret is reported as a
//! removed and an added `<redacted>` line.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use super::sensitive::SensitiveFieldSet;
use super::snapshot::{RenderedLine, Snapshot};
use super::RenderResult;

/// How a rendered line differs between the two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// Present in both
    Unchanged,
    /// Present only before
    Removed,
    /// Present only after
    Added,
}

impl LineChange {
    /// One-column marker written in front of the line
    pub fn marker(&self) -> char {
        match self {
            LineChange::Unchanged => ' ',
            LineChange::Removed => '-',
            LineChange::Added => '+',
        }
    }
}

/// A single rendered field line with its change marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub change: LineChange,
    pub text: String,
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.change, self.text.is_empty()) {
            (LineChange::Unchanged, true) => Ok(()),
            (change, true) => write!(f, "{}", change.marker()),
            (change, false) => write!(f, "{} {}", change.marker(), self.text),
        }
    }
}

/// True when any line is marked as added or removed
pub fn has_line_changes(lines: &[DiffLine]) -> bool {
    lines.iter().any(|line| line.change != LineChange::Unchanged)
}

/// Write `label` on its own line, then every line with its marker
pub fn write_diff<W: Write + ?Sized>(
    out: &mut W,
    label: &str,
    lines: &[DiffLine],
) -> RenderResult<()> {
    writeln!(out, "{label}")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Two versions of a configuration
///
/// Immutable once built: rendering only reads `before` and `after`, so a
/// shared `Diff` can be rendered from several threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff<T> {
    before: T,
    after: T,
}

impl<T: Serialize> Diff<T> {
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }

    pub fn before(&self) -> &T {
        &self.before
    }

    pub fn after(&self) -> &T {
        &self.after
    }

    /// Redact both sides and compare them line by line
    pub fn lines(&self, policy: &SensitiveFieldSet) -> RenderResult<Vec<DiffLine>> {
        let before = Snapshot::from_serialize(&self.before)?.keyed_lines(policy)?;
        let after = Snapshot::from_serialize(&self.after)?.keyed_lines(policy)?;
        Ok(diff_lines(&before, &after))
    }

    /// True when at least one line would be marked as added or removed
    pub fn has_changes(&self, policy: &SensitiveFieldSet) -> RenderResult<bool> {
        Ok(has_line_changes(&self.lines(policy)?))
    }

    /// Render with the built-in sensitive field set
    pub fn render<W: Write + ?Sized>(&self, out: &mut W, label: &str) -> RenderResult<()> {
        self.render_with(out, label, &SensitiveFieldSet::builtin())
    }

    /// Write `label` on its own line, then every field line prefixed by its
    /// change marker and a space
    pub fn render_with<W: Write + ?Sized>(
        &self,
        out: &mut W,
        label: &str,
        policy: &SensitiveFieldSet,
    ) -> RenderResult<()> {
        let lines = self.lines(policy)?;
        write_diff(out, label, &lines)
    }
}

/// Line diff over the longest common subsequence
///
/// The shared prefix and suffix are matched directly; the middle goes
/// through Hirschberg's divide and conquer, which needs memory linear in the
/// number of lines. A removal is emitted before an addition, so a changed
/// value shows its old line directly above its new one.
fn diff_lines(before: &[RenderedLine], after: &[RenderedLine]) -> Vec<DiffLine> {
    let prefix = before
        .iter()
        .zip(after)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = before[prefix..]
        .iter()
        .rev()
        .zip(after[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let mut lines = Vec::with_capacity(before.len().max(after.len()));
    lines.extend(
        before[..prefix]
            .iter()
            .map(|l| line(LineChange::Unchanged, &l.text)),
    );
    hirschberg(
        &before[prefix..before.len() - suffix],
        &after[prefix..after.len() - suffix],
        &mut lines,
    );
    lines.extend(
        before[before.len() - suffix..]
            .iter()
            .map(|l| line(LineChange::Unchanged, &l.text)),
    );
    lines
}

fn hirschberg(before: &[RenderedLine], after: &[RenderedLine], lines: &mut Vec<DiffLine>) {
    if before.is_empty() {
        lines.extend(after.iter().map(|l| line(LineChange::Added, &l.text)));
        return;
    }
    if after.is_empty() {
        lines.extend(before.iter().map(|l| line(LineChange::Removed, &l.text)));
        return;
    }
    if before.len() == 1 {
        match after.iter().position(|l| *l == before[0]) {
            Some(at) => {
                lines.extend(after[..at].iter().map(|l| line(LineChange::Added, &l.text)));
                lines.push(line(LineChange::Unchanged, &before[0].text));
                lines.extend(after[at + 1..].iter().map(|l| line(LineChange::Added, &l.text)));
            }
            None => {
                lines.push(line(LineChange::Removed, &before[0].text));
                lines.extend(after.iter().map(|l| line(LineChange::Added, &l.text)));
            }
        }
        return;
    }

    let mid = before.len() / 2;
    let head = lcs_prefix_row(&before[..mid], after);
    let tail = lcs_suffix_row(&before[mid..], after);

    // First split point with the best combined score
    let mut split = 0;
    for j in 1..=after.len() {
        if head[j] + tail[j] > head[split] + tail[split] {
            split = j;
        }
    }

    hirschberg(&before[..mid], &after[..split], lines);
    hirschberg(&before[mid..], &after[split..], lines);
}

/// `row[j]` = LCS length of `before` and `after[..j]`
fn lcs_prefix_row(before: &[RenderedLine], after: &[RenderedLine]) -> Vec<usize> {
    let mut prev = vec![0usize; after.len() + 1];
    let mut cur = vec![0usize; after.len() + 1];
    for b in before {
        for j in 0..after.len() {
            cur[j + 1] = if *b == after[j] {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

/// `row[j]` = LCS length of `before` and `after[j..]`
fn lcs_suffix_row(before: &[RenderedLine], after: &[RenderedLine]) -> Vec<usize> {
    let m = after.len();
    let mut prev = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];
    for b in before.iter().rev() {
        for j in (0..m).rev() {
            cur[j] = if *b == after[j] {
                prev[j + 1] + 1
            } else {
                cur[j + 1].max(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

fn line(change: LineChange, text: &str) -> DiffLine {
    DiffLine {
        change,
        text: text.to_string(),
    }
}
