// src/constants.rs

use std::time::Duration;

/// Default maximum file size for content ingestion: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Environment variable consulted when no explicit token is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Name of the per-process base directory (under the system temp dir)
/// that holds per-call clone workspaces.
pub const TMP_BASE_DIR_NAME: &str = "gitdigest";

/// Prefix for uniquely named per-call clone directories.
pub const CLONE_DIR_PREFIX: &str = "ingest-";

/// Separator line framing each `FILE:` header in the content section.
pub const CONTENT_SEPARATOR: &str = "================================================";

/// Host assumed for `owner/repo` shorthand sources.
pub const DEFAULT_HOST: &str = "github.com";

/// How long a clone subprocess may run before it is killed.
pub const CLONE_TIMEOUT: Duration = Duration::from_secs(120);

/// Bytes inspected from the head of a file for text/binary detection.
pub const TEXT_SNIFF_BUFFER_SIZE: usize = 1024;
