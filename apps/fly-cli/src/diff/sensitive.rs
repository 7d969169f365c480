//! Field-name predicate for redaction
//!
//! The redaction policy is an explicit list of patterns rather than string
//! checks spread through the renderer, so it can be configured and tested on
//! its own. Matching is case-sensitive.

/// Substrings that mark a field as sensitive unless configured otherwise
pub const DEFAULT_SENSITIVE_FRAGMENTS: &[&str] = &["password", "secret", "token", "private_key"];

/// A single rule matched against a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPattern {
    /// The field name equals this string
    Exact(String),
    /// The field name contains this string
    Contains(String),
}

impl FieldPattern {
    /// Check this pattern against a field name
    pub fn matches(&self, name: &str) -> bool {
        match self {
            FieldPattern::Exact(exact) => name == exact,
            FieldPattern::Contains(fragment) => name.contains(fragment.as_str()),
        }
    }
}

/// The set of field-name patterns whose values are never rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveFieldSet {
    patterns: Vec<FieldPattern>,
}

impl SensitiveFieldSet {
    /// A set that matches nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The built-in set: every name containing one of
    /// [`DEFAULT_SENSITIVE_FRAGMENTS`]
    pub fn builtin() -> Self {
        DEFAULT_SENSITIVE_FRAGMENTS
            .iter()
            .fold(Self::empty(), |set, fragment| set.with_fragment(*fragment))
    }

    /// Add an exact field name
    pub fn with_exact(mut self, name: impl Into<String>) -> Self {
        self.push(FieldPattern::Exact(name.into()));
        self
    }

    /// Add a substring; empty fragments are ignored since they would match
    /// every field
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.push(FieldPattern::Contains(fragment));
        }
        self
    }

    /// Add several exact field names
    pub fn with_exact_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |set, name| set.with_exact(name))
    }

    fn push(&mut self, pattern: FieldPattern) {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// True when any pattern matches the field name
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// The patterns in insertion order
    pub fn patterns(&self) -> &[FieldPattern] {
        &self.patterns
    }
}

impl Default for SensitiveFieldSet {
    fn default() -> Self {
        Self::builtin()
    }
}
