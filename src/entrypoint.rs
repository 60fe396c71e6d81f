//! Pipeline orchestration and the two public entry points.
//!
//! One canonical asynchronous implementation ([`ingest_async`]) carries the
//! whole pipeline; the blocking form ([`ingest`]) is a thin run-to-completion
//! adapter over it, so the two can never drift apart behaviorally.
//!
//! Resource lifecycle is RAII throughout: the clone workspace is a guard
//! value whose drop removes the directory, so cleanup holds on normal
//! return, on error, and when the future is dropped mid-clone.

use crate::clone::clone_repo;
use crate::constants::{
    CLONE_DIR_PREFIX, DEFAULT_MAX_FILE_SIZE, TMP_BASE_DIR_NAME, TOKEN_ENV_VAR,
};
use crate::core_types::Digest;
use crate::errors::{io_error_with_path, Error, Result};
use crate::ingestion::ingest_query;
use crate::query::{parse_query, PatternSpec};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Parameters for one ingestion call.
///
/// Only the source is required; everything else has the documented default.
///
/// ```
/// use gitdigest::IngestOptions;
///
/// let opts = IngestOptions::new("user/repo")
///     .branch("dev")
///     .max_file_size(512 * 1024)
///     .exclude_patterns(["*.lock", "target/**"]);
/// ```
#[derive(Debug, Clone)]
pub struct IngestOptions {
    source: String,
    temp_clone_dir: Option<PathBuf>,
    max_file_size: u64,
    include_patterns: Option<PatternSpec>,
    exclude_patterns: Option<PatternSpec>,
    branch: Option<String>,
    token: Option<String>,
    output: Option<PathBuf>,
}

impl IngestOptions {
    /// Starts an option set for `source`: a remote repository reference or
    /// a local path.
    pub fn new(source: impl Into<String>) -> Self {
        IngestOptions {
            source: source.into(),
            temp_clone_dir: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            include_patterns: None,
            exclude_patterns: None,
            branch: None,
            token: None,
            output: None,
        }
    }

    /// Reuses `dir` as the clone target instead of allocating a fresh temp
    /// directory. The directory is still removed once it has been used.
    pub fn temp_clone_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_clone_dir = Some(dir.into());
        self
    }

    /// Byte threshold above which files are excluded from content
    /// (default 10 MiB).
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Pattern or set of patterns selecting which files to include.
    pub fn include_patterns(mut self, patterns: impl Into<PatternSpec>) -> Self {
        self.include_patterns = Some(patterns.into());
        self
    }

    /// Pattern or set of patterns selecting which files to exclude.
    pub fn exclude_patterns(mut self, patterns: impl Into<PatternSpec>) -> Self {
        self.exclude_patterns = Some(patterns.into());
        self
    }

    /// Branch to clone; takes priority over a branch embedded in the source.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Access token for private repositories. Falls back to the
    /// `GITHUB_TOKEN` environment variable when unset.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// File path to additionally write `tree + "\n" + content` to.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// The per-call clone target, with drop-based cleanup.
///
/// An allocated workspace is removed on every exit path from the moment it
/// exists. A caller-supplied directory is only removed once the clone into
/// it succeeded ("once it has been used"); before that it stays untouched
/// because its contents are the caller's.
enum CloneWorkspace {
    Allocated(TempDir),
    Supplied { path: PathBuf, armed: bool },
}

impl CloneWorkspace {
    /// Allocates a fresh uniquely named directory under the process-wide
    /// base path.
    fn allocate() -> Result<Self> {
        let base = std::env::temp_dir().join(TMP_BASE_DIR_NAME);
        std::fs::create_dir_all(&base).map_err(|e| io_error_with_path(e, &base))?;
        let dir = tempfile::Builder::new()
            .prefix(CLONE_DIR_PREFIX)
            .tempdir_in(&base)
            .map_err(|e| io_error_with_path(e, &base))?;
        debug!("Allocated clone workspace at '{}'", dir.path().display());
        Ok(CloneWorkspace::Allocated(dir))
    }

    fn supplied(path: &Path) -> Self {
        CloneWorkspace::Supplied {
            path: path.to_path_buf(),
            armed: false,
        }
    }

    fn path(&self) -> &Path {
        match self {
            CloneWorkspace::Allocated(dir) => dir.path(),
            CloneWorkspace::Supplied { path, .. } => path,
        }
    }

    /// Marks a supplied directory as used, scheduling its removal.
    fn arm(&mut self) {
        if let CloneWorkspace::Supplied { armed, .. } = self {
            *armed = true;
        }
    }
}

impl Drop for CloneWorkspace {
    fn drop(&mut self) {
        // Allocated workspaces clean themselves up through TempDir's drop.
        if let CloneWorkspace::Supplied { path, armed: true } = self {
            if let Err(e) = std::fs::remove_dir_all(&*path) {
                // Best effort only; never escalate over the primary result.
                warn!(
                    "Failed to remove clone directory '{}': {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

/// Ingests a source into a [`Digest`]: summary, tree, and concatenated
/// content.
///
/// For remote sources this clones into a call-scoped temp directory that is
/// removed again on every exit path, including cancellation of this future
/// while the clone is in flight.
///
/// # Errors
/// Exactly one typed [`Error`] per failed call; partial results are never
/// returned. See the [`Error`] variants for the taxonomy.
pub async fn ingest_async(options: IngestOptions) -> Result<Digest> {
    let token = options
        .token
        .clone()
        .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
        .filter(|t| !t.is_empty());

    let mut query = parse_query(
        &options.source,
        options.max_file_size,
        false,
        options.include_patterns.clone(),
        options.exclude_patterns.clone(),
    )?;

    // Held across the ingestion so the clone directory outlives its use;
    // dropping it (success, error, or cancellation) triggers cleanup.
    let mut workspace = None;

    if query.remote_ref.is_some() {
        query.override_branch(options.branch.clone());

        let mut ws = match &options.temp_clone_dir {
            Some(dir) => CloneWorkspace::supplied(dir),
            None => CloneWorkspace::allocate()?,
        };
        query.local_path = ws.path().to_path_buf();

        if let Some(clone_config) = query.clone_config() {
            clone_repo(&clone_config, token.as_deref()).await?;
        }
        ws.arm();
        workspace = Some(ws);
    }

    let digest = ingest_query(&query)?;

    if let Some(output) = &options.output {
        let combined = format!("{}\n{}", digest.tree, digest.content);
        std::fs::write(output, combined).map_err(|e| io_error_with_path(e, output))?;
    }

    drop(workspace);
    Ok(digest)
}

/// Blocking form of [`ingest_async`], with identical semantics.
///
/// Runs the asynchronous pipeline to completion on a private
/// current-thread runtime.
///
/// # Errors
/// In addition to everything [`ingest_async`] can raise, returns
/// [`Error::Configuration`] when called from inside a running async
/// runtime, where nesting a second runtime would deadlock.
pub fn ingest(options: IngestOptions) -> Result<Digest> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::Configuration(
            "ingest() cannot be called from within an async runtime; use ingest_async() instead"
                .to_string(),
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Configuration(format!("failed to build tokio runtime: {}", e)))?;
    runtime.block_on(ingest_async(options))
}
