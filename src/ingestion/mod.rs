//! The ingestor: walks a resolved local tree, applies filters and the size
//! limit, and builds the three digest artifacts.
//!
//! Per-file problems (oversized, binary, unreadable, broken symlink) are
//! never fatal; they degrade to skip annotations in the tree. Only an
//! unreadable ingestion root raises [`Error::Ingestion`].

use crate::core_types::{Digest, DigestStats, FileEntry, FileStatus};
use crate::errors::{Error, Result};
use crate::query::IngestionQuery;
use log::debug;
use std::path::PathBuf;

mod content;
mod filter;
mod summary;
mod tree;
mod walker;

pub use content::is_likely_text_from_buffer;
pub use filter::PatternMatcher;

use walker::{RawEntry, RawKind};

/// Ingests the local tree described by `query` into a [`Digest`].
///
/// # Errors
/// Returns [`Error::Ingestion`] iff the ingestion root itself is missing or
/// unreadable (e.g. vanished after the clone).
pub fn ingest_query(query: &IngestionQuery) -> Result<Digest> {
    let root = query.ingest_root();
    let metadata = std::fs::metadata(&root).map_err(|e| Error::Ingestion {
        path: root.display().to_string(),
        reason: e.to_string(),
    })?;

    let matcher = PatternMatcher::new(&query.include_patterns, &query.exclude_patterns);

    if metadata.is_file() {
        return ingest_single_file(query, root, metadata.len(), &matcher);
    }

    let raw = walker::walk(&root, &matcher);
    debug!("Walk of '{}' yielded {} entries", root.display(), raw.len());

    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut entries: Vec<FileEntry> = Vec::new();
    for item in raw {
        match item.kind {
            RawKind::Dir => dirs.push(item.relative_path),
            RawKind::Symlink => entries.push(FileEntry {
                relative_path: item.relative_path,
                size: 0,
                status: FileStatus::SkippedSymlink,
                content: None,
            }),
            RawKind::File => entries.push(classify_file(&root, item, &matcher, query.max_file_size)),
        }
    }

    let mut stats = DigestStats::default();
    for entry in &entries {
        stats.record(entry);
    }

    let (tree, order) = tree::render_tree(&query.display_name(), &entries, &dirs);
    let content = content::render_content(&entries, &order);
    let summary = summary::build_summary(query, &stats);

    Ok(Digest {
        summary,
        tree,
        content,
    })
}

fn classify_file(
    root: &std::path::Path,
    item: RawEntry,
    matcher: &PatternMatcher,
    max_file_size: u64,
) -> FileEntry {
    let (status, text) = if !matcher.is_selected(&item.relative_path) {
        (FileStatus::Excluded, None)
    } else if item.size > max_file_size {
        (FileStatus::SkippedTooLarge, None)
    } else {
        match content::read_text(&root.join(&item.relative_path)) {
            content::TextOutcome::Text(text) => (FileStatus::Included, Some(text)),
            content::TextOutcome::Binary => (FileStatus::SkippedBinary, None),
            content::TextOutcome::Unreadable(e) => {
                debug!(
                    "Could not read '{}': {}",
                    item.relative_path.display(),
                    e
                );
                (FileStatus::SkippedUnreadable, None)
            }
        }
    };

    FileEntry {
        relative_path: item.relative_path,
        size: item.size,
        status,
        content: text,
    }
}

/// Degenerate case: the local source names a regular file. The digest
/// covers exactly that file.
fn ingest_single_file(
    query: &IngestionQuery,
    root: PathBuf,
    size: u64,
    matcher: &PatternMatcher,
) -> Result<Digest> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let item = RawEntry {
        relative_path: PathBuf::from(&name),
        size,
        kind: RawKind::File,
    };
    let parent = root.parent().map(PathBuf::from).unwrap_or_default();
    let entry = classify_file(&parent, item, matcher, query.max_file_size);

    let mut stats = DigestStats::default();
    stats.record(&entry);

    let mut tree = String::from("Directory structure:\n");
    match entry.status.annotation() {
        Some(note) => tree.push_str(&format!("└── {} {}\n", name, note)),
        None => tree.push_str(&format!("└── {}\n", name)),
    }

    let entries = vec![entry];
    let content = content::render_content(&entries, &[0]);
    let summary = summary::build_summary(query, &stats);

    Ok(Digest {
        summary,
        tree,
        content,
    })
}
