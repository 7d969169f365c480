//! Redacted before/after rendering of configuration snapshots
//!
//! A [`Diff`] holds two versions of a configuration. Each version is
//! flattened into a [`Snapshot`] (an ordered field list in serialization
//! order), rendered to `name : value` lines with every field matched by a
//! [`SensitiveFieldSet`] replaced by [`REDACTED_MARKER`], and then compared
//! line by line.
//!
//! # Components
//!
//! - `sensitive`: the field-name predicate deciding what gets masked
//! - `snapshot`: ordered flattening and single-snapshot rendering
//! - `render`: the line diff and the labelled before/after output

pub mod render;
pub mod sensitive;
pub mod snapshot;

use thiserror::Error;

pub use render::{has_line_changes, write_diff, Diff, DiffLine, LineChange};
pub use sensitive::{FieldPattern, SensitiveFieldSet};
pub use snapshot::{Snapshot, REDACTED_MARKER};

/// Errors raised while rendering a snapshot or a diff
#[derive(Debug, Error)]
pub enum DiffError {
    /// The snapshot could not be turned into an ordered field list
    #[error("Cannot serialize snapshot: {0}")]
    Serialization(String),

    /// The output sink rejected a write
    #[error("Cannot write rendered output: {0}")]
    Write(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, DiffError>;
