//! `gitdigest` turns a git repository or local directory into a single,
//! bounded, LLM-ready text digest: a short summary, a textual tree of the
//! selected file structure, and the concatenated contents of the selected
//! files.
//!
//! The pipeline has three stages behind one entry point:
//! 1.  **Parse**: classify the source string (local path vs. remote
//!     reference) and normalize filters into an [`IngestionQuery`].
//! 2.  **Clone** (remote sources only): materialize a shallow working tree
//!     in a call-scoped temp directory that is always removed again.
//! 3.  **Ingest**: walk the tree, apply include/exclude patterns and the
//!     size limit, and build the three digest artifacts.
//!
//! Both a blocking ([`ingest`]) and an asynchronous ([`ingest_async`]) form
//! exist with identical semantics; the blocking form simply runs the async
//! pipeline to completion on a private runtime.
//!
//! # Example: digesting a local directory
//!
//! ```
//! use gitdigest::{ingest, IngestOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
//! fs::write(dir.path().join("notes.md"), "# notes").unwrap();
//!
//! let digest = ingest(
//!     IngestOptions::new(dir.path().to_str().unwrap()).exclude_patterns("*.md"),
//! )
//! .unwrap();
//!
//! assert!(digest.summary.contains("Files analyzed: 1"));
//! assert!(digest.content.contains("fn main() {}"));
//! assert!(!digest.content.contains("# notes"));
//! ```
//!
//! Remote sources accept full URLs (`https://github.com/user/repo`,
//! optionally with `/tree/<branch>/<subpath>`), SSH forms, and the
//! `owner/repo` shorthand. Private repositories take a token explicitly or
//! via the `GITHUB_TOKEN` environment variable.

pub mod clone;
pub mod constants;
pub mod core_types;
pub mod errors;
pub mod ingestion;
pub mod query;

mod entrypoint;

// Re-export the public API surface.
pub use clone::{clone_repo, CloneConfig};
pub use core_types::{Digest, DigestStats, FileEntry, FileStatus};
pub use entrypoint::{ingest, ingest_async, IngestOptions};
pub use errors::{CloneError, Error, Result};
pub use ingestion::ingest_query;
pub use query::{parse_query, IngestionQuery, PatternSpec, RemoteRef, SourceKind};
