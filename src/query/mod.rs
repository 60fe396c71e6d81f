//! Turns raw caller parameters into a normalized, immutable [`IngestionQuery`].
//!
//! All shorthand handling lives here: pattern inputs are normalized to
//! canonical sets, the source string is classified exactly once, and any
//! branch embedded in a remote source becomes the query's default branch
//! (later overridable by an explicit caller-supplied branch, which the
//! pipeline enforces).

use crate::clone::CloneConfig;
use crate::errors::{Error, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;

mod patterns;
mod source;

pub use patterns::{normalize_patterns, PatternSpec};
pub use source::{resolve_source, RemoteRef, ResolvedSource, SourceKind};

/// The normalized, validated description of one ingestion call.
///
/// Produced once by [`parse_query`] and read by the cloner and the ingestor.
/// For remote sources `local_path` starts empty; the pipeline fills it in
/// with the clone workspace before anything else consumes the query.
#[derive(Debug, Clone)]
pub struct IngestionQuery {
    /// Local directory vs. remote repository.
    pub source_kind: SourceKind,
    /// Ingestion root: the user path for local sources, the clone directory
    /// for remote ones.
    pub local_path: PathBuf,
    /// Parsed remote reference; present iff `source_kind` is `Remote`.
    pub remote_ref: Option<RemoteRef>,
    /// Branch to clone. Defaults to the branch embedded in the source
    /// string, if any.
    pub branch: Option<String>,
    /// Files larger than this many bytes are excluded from content.
    pub max_file_size: u64,
    /// Canonical include set; empty means "include everything not excluded".
    pub include_patterns: BTreeSet<String>,
    /// Canonical exclude set.
    pub exclude_patterns: BTreeSet<String>,
}

impl IngestionQuery {
    /// Applies the caller's explicit branch choice. An explicit branch
    /// always wins over one embedded in the source string.
    pub fn override_branch(&mut self, explicit: Option<String>) {
        if explicit.is_some() {
            self.branch = explicit;
        }
    }

    /// Derives the clone parameters for a remote query. `None` for local
    /// sources. Call after the pipeline has assigned `local_path`.
    pub fn clone_config(&self) -> Option<CloneConfig> {
        self.remote_ref.as_ref().map(|remote| CloneConfig {
            remote: remote.clone(),
            branch: self.branch.clone(),
            local_path: self.local_path.clone(),
        })
    }

    /// The directory the ingestor actually walks: `local_path`, pushed into
    /// the remote subpath when the source string carried one.
    pub(crate) fn ingest_root(&self) -> PathBuf {
        match &self.remote_ref {
            Some(remote) if !remote.subpath.is_empty() => {
                self.local_path.join(&remote.subpath)
            }
            _ => self.local_path.clone(),
        }
    }

    /// Display name used as the tree root label and in the summary.
    pub(crate) fn display_name(&self) -> String {
        match &self.remote_ref {
            Some(remote) => format!("{}-{}", remote.owner, remote.repo_name),
            None => self
                .local_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.local_path.display().to_string()),
        }
    }
}

/// Parses raw call parameters into an [`IngestionQuery`].
///
/// Touches the filesystem only for the local-existence check of the source
/// classification; never touches the network.
///
/// # Errors
/// - [`Error::InvalidSource`] if the source is empty or unclassifiable.
/// - [`Error::InvalidPattern`] for malformed include/exclude patterns.
/// - [`Error::Configuration`] if `max_file_size` is zero.
pub fn parse_query(
    source: &str,
    max_file_size: u64,
    from_web: bool,
    include_patterns: Option<PatternSpec>,
    exclude_patterns: Option<PatternSpec>,
) -> Result<IngestionQuery> {
    if max_file_size == 0 {
        return Err(Error::Configuration(
            "max_file_size must be a positive number of bytes".to_string(),
        ));
    }

    let include_patterns = normalize_patterns(include_patterns)?;
    let exclude_patterns = normalize_patterns(exclude_patterns)?;

    match resolve_source(source, from_web)? {
        ResolvedSource::Local(path) => Ok(IngestionQuery {
            source_kind: SourceKind::Local,
            local_path: path,
            remote_ref: None,
            branch: None,
            max_file_size,
            include_patterns,
            exclude_patterns,
        }),
        ResolvedSource::Remote(remote) => Ok(IngestionQuery {
            source_kind: SourceKind::Remote,
            // Assigned by the pipeline once a clone workspace exists.
            local_path: PathBuf::new(),
            branch: remote.branch.clone(),
            remote_ref: Some(remote),
            max_file_size,
            include_patterns,
            exclude_patterns,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAX_FILE_SIZE;
    use tempfile::tempdir;

    #[test]
    fn test_local_query() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let query = parse_query(
            temp.path().to_str().unwrap(),
            DEFAULT_MAX_FILE_SIZE,
            false,
            None,
            None,
        )?;
        assert_eq!(query.source_kind, SourceKind::Local);
        assert!(query.remote_ref.is_none());
        assert_eq!(query.local_path, temp.path());
        assert!(query.include_patterns.is_empty());
        Ok(())
    }

    #[test]
    fn test_remote_query_inherits_embedded_branch() -> anyhow::Result<()> {
        let query = parse_query(
            "https://github.com/user/repo/tree/main/docs",
            DEFAULT_MAX_FILE_SIZE,
            false,
            None,
            None,
        )?;
        assert_eq!(query.source_kind, SourceKind::Remote);
        assert_eq!(query.branch.as_deref(), Some("main"));
        let remote = query.remote_ref.as_ref().unwrap();
        assert_eq!(remote.subpath, "docs");
        Ok(())
    }

    #[test]
    fn test_explicit_branch_overrides_embedded_one() -> anyhow::Result<()> {
        let mut query = parse_query(
            "https://github.com/user/repo/tree/main",
            DEFAULT_MAX_FILE_SIZE,
            false,
            None,
            None,
        )?;
        query.override_branch(Some("dev".to_string()));
        assert_eq!(query.branch.as_deref(), Some("dev"));

        // Absent explicit branch leaves the embedded default untouched.
        query.override_branch(None);
        assert_eq!(query.branch.as_deref(), Some("dev"));
        Ok(())
    }

    #[test]
    fn test_clone_config_uses_assigned_path_and_branch() -> anyhow::Result<()> {
        let mut query = parse_query("user/repo", DEFAULT_MAX_FILE_SIZE, false, None, None)?;
        query.local_path = PathBuf::from("/tmp/workspace");
        query.override_branch(Some("dev".to_string()));
        let config = query.clone_config().unwrap();
        assert_eq!(config.local_path, PathBuf::from("/tmp/workspace"));
        assert_eq!(config.branch.as_deref(), Some("dev"));
        assert_eq!(config.remote.slug(), "user/repo");
        Ok(())
    }

    #[test]
    fn test_clone_config_is_none_for_local() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let query = parse_query(
            temp.path().to_str().unwrap(),
            DEFAULT_MAX_FILE_SIZE,
            false,
            None,
            None,
        )?;
        assert!(query.clone_config().is_none());
        Ok(())
    }

    #[test]
    fn test_patterns_normalized_into_query() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let query = parse_query(
            temp.path().to_str().unwrap(),
            DEFAULT_MAX_FILE_SIZE,
            false,
            Some("*.rs".into()),
            Some(vec!["target/**", "*.lock", "target/**"].into()),
        )?;
        assert_eq!(query.include_patterns.len(), 1);
        assert_eq!(query.exclude_patterns.len(), 2);
        Ok(())
    }

    #[test]
    fn test_zero_max_file_size_rejected() {
        assert!(matches!(
            parse_query("user/repo", 0, false, None, None),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_ingest_root_honors_subpath() -> anyhow::Result<()> {
        let mut query = parse_query(
            "https://github.com/user/repo/tree/main/src/lib",
            DEFAULT_MAX_FILE_SIZE,
            false,
            None,
            None,
        )?;
        query.local_path = PathBuf::from("/tmp/clone");
        assert_eq!(query.ingest_root(), PathBuf::from("/tmp/clone/src/lib"));
        Ok(())
    }

    #[test]
    fn test_display_name() -> anyhow::Result<()> {
        let query = parse_query("user/repo", DEFAULT_MAX_FILE_SIZE, false, None, None)?;
        assert_eq!(query.display_name(), "user-repo");
        Ok(())
    }
}
