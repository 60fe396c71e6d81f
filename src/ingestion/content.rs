//! Reading selected files as text, and rendering the content section.
//!
//! Text detection mirrors the tool's overall stance: `content_inspector`
//! classifies the head of the file, and the full body must decode as UTF-8.
//! Anything else is recorded as a binary skip, never an error.

use crate::constants::{CONTENT_SEPARATOR, TEXT_SNIFF_BUFFER_SIZE};
use crate::core_types::{FileEntry, FileStatus};
use content_inspector::ContentType;
use log::debug;
use std::fmt::Write as _;
use std::path::Path;

/// Outcome of attempting to read one selected file as text.
#[derive(Debug)]
pub(crate) enum TextOutcome {
    Text(String),
    Binary,
    Unreadable(std::io::Error),
}

/// Checks whether a byte buffer looks like text.
///
/// Explicit UTF-8 BOMs pass; plain UTF-8 passes only if the slice is
/// actually valid; everything else is treated as binary.
pub fn is_likely_text_from_buffer(buffer: &[u8]) -> bool {
    match content_inspector::inspect(buffer) {
        ContentType::UTF_8_BOM => true,
        ContentType::UTF_8 => std::str::from_utf8(buffer).is_ok(),
        _ => false,
    }
}

/// Reads the file at `path` and decodes it as text.
pub(crate) fn read_text(path: &Path) -> TextOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return TextOutcome::Unreadable(e),
    };

    let head = &bytes[..bytes.len().min(TEXT_SNIFF_BUFFER_SIZE)];
    if !is_likely_text_from_buffer(head) {
        debug!("Classified '{}' as binary", path.display());
        return TextOutcome::Binary;
    }

    match String::from_utf8(bytes) {
        Ok(text) => TextOutcome::Text(text),
        // Head looked fine but the body is not valid UTF-8.
        Err(_) => TextOutcome::Binary,
    }
}

/// Renders the content section: each included file's text preceded by a
/// delimiter header with its relative path, in the given traversal order.
pub(crate) fn render_content(entries: &[FileEntry], order: &[usize]) -> String {
    let mut out = String::new();
    for &index in order {
        let entry = &entries[index];
        if entry.status != FileStatus::Included {
            continue;
        }
        let text = entry.content.as_deref().unwrap_or_default();
        let _ = writeln!(out, "{}", CONTENT_SEPARATOR);
        let _ = writeln!(out, "FILE: {}", entry.relative_path.display());
        let _ = writeln!(out, "{}", CONTENT_SEPARATOR);
        let _ = writeln!(out, "{}", text.trim_end_matches('\n'));
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn entry(path: &str, status: FileStatus, content: Option<&str>) -> FileEntry {
        FileEntry {
            relative_path: PathBuf::from(path),
            size: content.map_or(0, |c| c.len() as u64),
            status,
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_buffer_detect_utf8_text() {
        assert!(is_likely_text_from_buffer(b"plain UTF-8 text"));
    }

    #[test]
    fn test_buffer_detect_bom() {
        assert!(is_likely_text_from_buffer(&[0xEF, 0xBB, 0xBF, b'h', b'i']));
    }

    #[test]
    fn test_buffer_detect_null_byte_as_binary() {
        assert!(!is_likely_text_from_buffer(b"has a \0 null byte"));
    }

    #[test]
    fn test_buffer_detect_invalid_utf8_as_binary() {
        assert!(!is_likely_text_from_buffer(&[0x48, 0x65, 0x80, 0x6f]));
    }

    #[test]
    fn test_read_text_roundtrip() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("hello.txt");
        fs::write(&path, "hello\nworld\n")?;
        match read_text(&path) {
            TextOutcome::Text(text) => assert_eq!(text, "hello\nworld\n"),
            other => panic!("expected text, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_read_text_binary_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])?;
        assert!(matches!(read_text(&path), TextOutcome::Binary));
        Ok(())
    }

    #[test]
    fn test_read_text_missing_file() {
        let outcome = read_text(Path::new("no/such/file.txt"));
        assert!(matches!(outcome, TextOutcome::Unreadable(_)));
    }

    #[test]
    fn test_read_text_invalid_utf8_past_sniff_window() -> anyhow::Result<()> {
        // Valid ASCII head, invalid byte beyond the sniff buffer.
        let temp = tempdir()?;
        let path = temp.path().join("tail.bin");
        let mut bytes = vec![b'a'; TEXT_SNIFF_BUFFER_SIZE + 10];
        bytes.push(0x80);
        fs::write(&path, bytes)?;
        assert!(matches!(read_text(&path), TextOutcome::Binary));
        Ok(())
    }

    #[test]
    fn test_render_content_headers_and_order() {
        let entries = vec![
            entry("b.txt", FileStatus::Included, Some("bee\n")),
            entry("a.txt", FileStatus::Included, Some("ay")),
            entry("skip.bin", FileStatus::SkippedBinary, None),
        ];
        // Traversal order puts a.txt first.
        let content = render_content(&entries, &[1, 0, 2]);

        let expected = format!(
            "{sep}\nFILE: a.txt\n{sep}\nay\n\n{sep}\nFILE: b.txt\n{sep}\nbee\n\n",
            sep = CONTENT_SEPARATOR
        );
        assert_eq!(content, expected);
    }

    #[test]
    fn test_render_content_empty_selection() {
        let entries = vec![entry("x.bin", FileStatus::Excluded, None)];
        assert_eq!(render_content(&entries, &[0]), "");
    }
}
