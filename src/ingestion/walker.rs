//! Filesystem enumeration for the ingestion root.
//!
//! Built on `ignore::WalkBuilder` with its standard filters disabled: the
//! digest decides inclusion itself, so `.gitignore` rules and hidden-file
//! conventions do not apply. Symbolic links are never followed. Directories
//! whose own relative path matches an exclude pattern are pruned from the
//! walk entirely, as is the `.git` metadata directory.

use crate::ingestion::filter::PatternMatcher;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// What kind of filesystem entry the walker saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawKind {
    Dir,
    File,
    Symlink,
}

/// One enumerated entry, relative to the ingestion root.
#[derive(Debug, Clone)]
pub(crate) struct RawEntry {
    pub relative_path: PathBuf,
    pub size: u64,
    pub kind: RawKind,
}

/// Enumerates everything under `root`, pruning excluded directories.
///
/// Per-entry walk errors degrade to a warning and the entry is dropped;
/// only the root itself failing is the caller's concern (checked before
/// this runs).
pub(crate) fn walk(root: &Path, matcher: &PatternMatcher) -> Vec<RawEntry> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let filter_root = root.to_path_buf();
    let filter_matcher = matcher.clone();
    builder.filter_entry(move |entry| {
        let is_dir = entry
            .file_type()
            .map(|ft| ft.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return true;
        }
        if entry.file_name() == std::ffi::OsStr::new(".git") {
            debug!("Pruning VCS metadata directory: {:?}", entry.path());
            return false;
        }
        if let Ok(relative) = entry.path().strip_prefix(&filter_root) {
            if !relative.as_os_str().is_empty() && filter_matcher.is_excluded(relative) {
                debug!("Pruning excluded directory: {:?}", relative);
                return false;
            }
        }
        true
    });

    let mut entries = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry during walk: {}", e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let relative_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        let kind = if file_type.is_symlink() {
            RawKind::Symlink
        } else if file_type.is_dir() {
            RawKind::Dir
        } else {
            RawKind::File
        };

        let size = if kind == RawKind::File {
            match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    warn!(
                        "Skipping '{}': could not read metadata: {}",
                        entry.path().display(),
                        e
                    );
                    continue;
                }
            }
        } else {
            0
        };

        entries.push(RawEntry {
            relative_path,
            size,
            kind,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    fn no_patterns() -> PatternMatcher {
        PatternMatcher::new(&BTreeSet::new(), &BTreeSet::new())
    }

    fn rel_paths(entries: &[RawEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.relative_path.display().to_string())
            .collect()
    }

    #[test]
    fn test_walk_enumerates_files_and_dirs() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("sub"))?;
        fs::write(temp.path().join("a.txt"), "aaa")?;
        fs::write(temp.path().join("sub/b.txt"), "bbbb")?;

        let entries = walk(temp.path(), &no_patterns());
        let paths = rel_paths(&entries);
        assert!(paths.contains(&"a.txt".to_string()));
        assert!(paths.contains(&"sub".to_string()));
        assert!(paths.contains(&"sub/b.txt".to_string()));

        let b = entries
            .iter()
            .find(|e| e.relative_path.ends_with("b.txt"))
            .unwrap();
        assert_eq!(b.kind, RawKind::File);
        assert_eq!(b.size, 4);
        Ok(())
    }

    #[test]
    fn test_git_dir_is_pruned() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir(temp.path().join(".git"))?;
        fs::write(temp.path().join(".git/HEAD"), "ref: refs/heads/main")?;
        fs::write(temp.path().join("kept.txt"), "x")?;

        let entries = walk(temp.path(), &no_patterns());
        let paths = rel_paths(&entries);
        assert_eq!(paths, vec!["kept.txt".to_string()]);
        Ok(())
    }

    #[test]
    fn test_excluded_directory_is_pruned() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("node_modules"))?;
        fs::write(temp.path().join("node_modules/dep.js"), "x")?;
        fs::write(temp.path().join("app.js"), "y")?;

        let excludes: BTreeSet<String> = ["node_modules".to_string()].into_iter().collect();
        let matcher = PatternMatcher::new(&BTreeSet::new(), &excludes);

        let entries = walk(temp.path(), &matcher);
        let paths = rel_paths(&entries);
        assert_eq!(paths, vec!["app.js".to_string()]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_reported_not_followed() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("real"))?;
        fs::write(temp.path().join("real/file.txt"), "data")?;
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link"))?;

        let entries = walk(temp.path(), &no_patterns());
        let link = entries
            .iter()
            .find(|e| e.relative_path == Path::new("link"))
            .unwrap();
        assert_eq!(link.kind, RawKind::Symlink);
        // Nothing under the link was descended into.
        assert!(!entries
            .iter()
            .any(|e| e.relative_path.starts_with("link/")));
        Ok(())
    }
}
