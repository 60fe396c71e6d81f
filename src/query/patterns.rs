//! Normalization of include/exclude pattern inputs.
//!
//! Callers may pass a single pattern string or a whole set; past this
//! boundary the rest of the crate only ever sees a canonical, de-duplicated
//! `BTreeSet<String>` with every entry validated as a compilable glob.

use crate::errors::{Error, Result};
use std::collections::BTreeSet;

/// Shorthand accepted for the include/exclude parameters: one pattern or
/// many. Conversions exist for the common string and collection types so
/// call sites stay terse.
#[derive(Debug, Clone)]
pub enum PatternSpec {
    /// A single glob pattern.
    One(String),
    /// A set of glob patterns.
    Many(Vec<String>),
}

impl From<&str> for PatternSpec {
    fn from(pattern: &str) -> Self {
        PatternSpec::One(pattern.to_string())
    }
}

impl From<String> for PatternSpec {
    fn from(pattern: String) -> Self {
        PatternSpec::One(pattern)
    }
}

impl From<Vec<String>> for PatternSpec {
    fn from(patterns: Vec<String>) -> Self {
        PatternSpec::Many(patterns)
    }
}

impl From<Vec<&str>> for PatternSpec {
    fn from(patterns: Vec<&str>) -> Self {
        PatternSpec::Many(patterns.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternSpec {
    fn from(patterns: [&str; N]) -> Self {
        PatternSpec::Many(patterns.iter().map(|p| p.to_string()).collect())
    }
}

/// Normalizes an optional pattern input into a canonical set.
///
/// Empty or whitespace-only patterns and patterns that fail glob
/// compilation are rejected with [`Error::InvalidPattern`]. Duplicates
/// collapse silently. `None` yields the empty set.
pub fn normalize_patterns(spec: Option<PatternSpec>) -> Result<BTreeSet<String>> {
    let raw = match spec {
        None => return Ok(BTreeSet::new()),
        Some(PatternSpec::One(p)) => vec![p],
        Some(PatternSpec::Many(ps)) => ps,
    };

    let mut normalized = BTreeSet::new();
    for pattern in raw {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidPattern {
                pattern,
                reason: "pattern is empty or whitespace-only".to_string(),
            });
        }
        if let Err(e) = glob::Pattern::new(trimmed) {
            return Err(Error::InvalidPattern {
                pattern: trimmed.to_string(),
                reason: e.to_string(),
            });
        }
        normalized.insert(trimmed.to_string());
    }
    Ok(normalized)
}
