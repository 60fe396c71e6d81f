//! Defines core data structures shared across the ingestion pipeline.
//!
//! `Digest` is the three-part output of one ingestion call; `FileEntry` and
//! `FileStatus` describe every filesystem entry the walker enumerated and
//! what became of it.

use std::path::PathBuf;

/// The three-part output of one ingestion call.
///
/// Produced once per call and immutable afterwards. For identical, unchanged
/// inputs the `tree` and `content` fields are byte-identical across calls.
#[derive(Debug, Clone)]
pub struct Digest {
    /// Short human-readable description: repository/directory name, branch
    /// (if remote), file count, approximate total size, skip notice.
    pub summary: String,
    /// Indented textual rendering of the enumerated file structure.
    pub tree: String,
    /// Concatenation of every included file's text, each preceded by a
    /// delimiter header carrying its relative path.
    pub content: String,
}

/// What happened to a single enumerated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Selected and readable; its text is part of the content section.
    Included,
    /// Filtered out by the include/exclude patterns. Listed in the tree
    /// without an annotation and absent from the content section.
    Excluded,
    /// Selected but larger than the configured maximum file size.
    SkippedTooLarge,
    /// Selected but failed the text-decodability check.
    SkippedBinary,
    /// Selected but could not be read (permissions, vanished mid-walk).
    SkippedUnreadable,
    /// A symbolic link. Links are never followed.
    SkippedSymlink,
}

impl FileStatus {
    /// The tree-output marker for this status, if any.
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            FileStatus::Included | FileStatus::Excluded => None,
            FileStatus::SkippedTooLarge => Some("[skipped: file too large]"),
            FileStatus::SkippedBinary => Some("[skipped: binary]"),
            FileStatus::SkippedUnreadable => Some("[skipped: unreadable]"),
            FileStatus::SkippedSymlink => Some("[skipped: symlink]"),
        }
    }

    /// Whether this status counts toward the summary's skip notice.
    pub fn is_skipped(&self) -> bool {
        self.annotation().is_some()
    }
}

/// A file enumerated during the walk, with its classification outcome.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the ingestion root, used in tree and content output.
    pub relative_path: PathBuf,
    /// Size in bytes from metadata (0 for symlinks).
    pub size: u64,
    /// Classification outcome for this file.
    pub status: FileStatus,
    /// Decoded text, present iff `status == Included`.
    pub content: Option<String>,
}

/// Aggregate counts collected while classifying files, consumed by the
/// summary builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestStats {
    /// Number of files whose content is part of the digest.
    pub analyzed: usize,
    /// Total size in bytes of the analyzed files.
    pub total_bytes: u64,
    /// Files skipped because they exceed the maximum file size.
    pub oversized: usize,
    /// Files skipped by the text-decodability check.
    pub binary: usize,
    /// Files skipped because reading them failed.
    pub unreadable: usize,
    /// Symbolic links encountered (never followed).
    pub symlinks: usize,
}

impl DigestStats {
    /// Total number of skipped entries across all skip reasons.
    pub fn skipped(&self) -> usize {
        self.oversized + self.binary + self.unreadable + self.symlinks
    }

    /// Folds one classified entry into the running counts.
    pub(crate) fn record(&mut self, entry: &FileEntry) {
        match entry.status {
            FileStatus::Included => {
                self.analyzed += 1;
                self.total_bytes += entry.size;
            }
            FileStatus::Excluded => {}
            FileStatus::SkippedTooLarge => self.oversized += 1,
            FileStatus::SkippedBinary => self.binary += 1,
            FileStatus::SkippedUnreadable => self.unreadable += 1,
            FileStatus::SkippedSymlink => self.symlinks += 1,
        }
    }
}
