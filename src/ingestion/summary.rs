//! Builds the digest summary: what was ingested, how much of it, and what
//! got skipped.

use crate::core_types::DigestStats;
use crate::query::{IngestionQuery, SourceKind};
use byte_unit::{Byte, UnitType};
use std::fmt::Write as _;

/// Renders the summary section for one completed ingestion.
pub(crate) fn build_summary(query: &IngestionQuery, stats: &DigestStats) -> String {
    let mut out = String::new();

    match (&query.source_kind, &query.remote_ref) {
        (SourceKind::Remote, Some(remote)) => {
            let _ = writeln!(out, "Repository: {}", remote.slug());
            if let Some(branch) = &query.branch {
                let _ = writeln!(out, "Branch: {}", branch);
            }
            if !remote.subpath.is_empty() {
                let _ = writeln!(out, "Subpath: {}", remote.subpath);
            }
        }
        _ => {
            let _ = writeln!(out, "Directory: {}", query.display_name());
        }
    }

    let _ = writeln!(out, "Files analyzed: {}", stats.analyzed);
    let _ = writeln!(out, "Estimated size: {}", human_size(stats.total_bytes));

    if stats.skipped() > 0 {
        let mut reasons = Vec::new();
        if stats.oversized > 0 {
            reasons.push(format!("{} too large", stats.oversized));
        }
        if stats.binary > 0 {
            reasons.push(format!("{} binary", stats.binary));
        }
        if stats.unreadable > 0 {
            reasons.push(format!("{} unreadable", stats.unreadable));
        }
        if stats.symlinks > 0 {
            reasons.push(format!("{} symlink", stats.symlinks));
        }
        let _ = writeln!(
            out,
            "Skipped files: {} ({})",
            stats.skipped(),
            reasons.join(", ")
        );
    }

    out
}

fn human_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{:.2}", adjusted)
}
