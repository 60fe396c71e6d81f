//! Glob-based path selection.
//!
//! Matching is relative to the ingestion root and case-sensitive. Patterns
//! containing `/` match the whole relative path, with `*` confined to one
//! segment and `**` crossing segments; patterns without `/` match any
//! single path component, so `*.md` catches `docs/readme.md`. A file is
//! selected iff the include set is empty or matches it, and no exclude
//! pattern matches; exclude always wins.

use glob::{MatchOptions, Pattern};
use log::warn;
use std::collections::BTreeSet;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude sets for one ingestion call.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl PatternMatcher {
    /// Compiles the normalized pattern sets. The query parser already
    /// validated them; a pattern that still fails to compile is dropped
    /// with a warning rather than aborting the call.
    pub fn new(includes: &BTreeSet<String>, excludes: &BTreeSet<String>) -> Self {
        PatternMatcher {
            includes: compile(includes),
            excludes: compile(excludes),
        }
    }

    /// Include-and-not-excluded test for one relative file path.
    pub fn is_selected(&self, relative_path: &Path) -> bool {
        if self.is_excluded(relative_path) {
            return false;
        }
        self.includes.is_empty()
            || self
                .includes
                .iter()
                .any(|p| pattern_matches(p, relative_path))
    }

    /// Whether any exclude pattern matches the relative path.
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        self.excludes
            .iter()
            .any(|p| pattern_matches(p, relative_path))
    }
}

fn compile(patterns: &BTreeSet<String>) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|raw| match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Dropping invalid glob pattern '{}': {}", raw, e);
                None
            }
        })
        .collect()
}

fn pattern_matches(pattern: &Pattern, relative_path: &Path) -> bool {
    if pattern.as_str().contains('/') {
        return pattern.matches_path_with(relative_path, MATCH_OPTIONS);
    }
    // Segment-local pattern: test every path component so `*.md` and bare
    // directory names apply at any depth.
    relative_path.components().any(|component| {
        pattern.matches_with(&component.as_os_str().to_string_lossy(), MATCH_OPTIONS)
    })
}
