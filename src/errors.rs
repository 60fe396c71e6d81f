//! Defines the typed error surface of the crate.
//!
//! Every failure mode of the ingestion pipeline maps to exactly one variant
//! of [`Error`]; clone-specific failures carry a nested [`CloneError`] with
//! more precise causes (auth, missing ref, timeout, ...).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type returned by the ingestion entry points.
#[derive(Error, Debug)]
pub enum Error {
    /// The source string is neither an existing local path nor a parseable
    /// remote repository reference.
    #[error("invalid source '{source}': {reason}")]
    InvalidSource {
        /// The offending source string as given by the caller.
        // `r#` keeps thiserror from treating this field as the error's
        // `#[source]`; to rustc it is the same field name `source`.
        r#source: String,
        /// Why classification failed.
        reason: String,
    },

    /// An include or exclude pattern was empty, whitespace-only, or not a
    /// valid glob.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why normalization rejected it.
        reason: String,
    },

    /// The remote fetch failed. See [`CloneError`] for the specific cause.
    #[error(transparent)]
    Clone(#[from] CloneError),

    /// The resolved ingestion root is unreadable or vanished before the
    /// walk could run. Per-file problems never produce this error.
    #[error("cannot ingest '{path}': {reason}")]
    Ingestion {
        /// The ingestion root that could not be read.
        path: String,
        /// Why the root is unusable.
        reason: String,
    },

    /// Invalid caller-side configuration, including invoking the blocking
    /// entry point from inside a running async runtime.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// I/O error with path context (e.g. writing the output file).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the clone boundary (the `git` subprocess).
#[derive(Error, Debug)]
pub enum CloneError {
    /// The `git` executable could not be started at all.
    #[error("failed to launch git: {0}")]
    Spawn(#[source] std::io::Error),

    /// The remote rejected the credentials (or required some).
    #[error("authentication failed for '{url}'")]
    AuthenticationFailed {
        /// The clone URL with any embedded credential redacted.
        url: String,
    },

    /// The requested branch, tag, or repository does not exist.
    #[error("ref '{reference}' not found at '{url}'")]
    RefNotFound {
        /// The branch or repository reference that could not be resolved.
        reference: String,
        /// The clone URL with any embedded credential redacted.
        url: String,
    },

    /// The clone ran longer than the configured timeout and was killed.
    #[error("clone of '{url}' timed out after {seconds}s")]
    Timeout {
        /// The clone URL with any embedded credential redacted.
        url: String,
        /// The timeout that elapsed.
        seconds: u64,
    },

    /// `git clone` exited non-zero for a reason we could not classify.
    #[error("git clone of '{url}' failed: {stderr}")]
    CommandFailed {
        /// The clone URL with any embedded credential redacted.
        url: String,
        /// Trimmed (and credential-redacted) stderr from the subprocess.
        stderr: String,
    },
}

/// Helper to create an [`Error::Io`] with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
