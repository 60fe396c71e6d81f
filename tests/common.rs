// tests/common.rs

use std::fs;
use std::path::Path;

/// Creates a file (and any parent directories) under `dir_path`.
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn create_file(
    dir_path: &Path,
    relative_path: &str,
    content: impl AsRef<[u8]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_path = dir_path.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(())
}
