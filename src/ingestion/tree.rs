//! Textual tree rendering of the enumerated structure.
//!
//! Ordering rule, applied at every level: directories first, then files,
//! each sorted lexicographically. The traversal order produced here also
//! fixes the concatenation order of the content section, so tree and
//! content always agree.

use crate::core_types::FileEntry;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

#[derive(Default)]
struct DirNode {
    dirs: BTreeMap<String, DirNode>,
    /// File name -> index into the entry slice.
    files: BTreeMap<String, usize>,
}

impl DirNode {
    fn dir_mut(&mut self, relative_dir: &Path) -> &mut DirNode {
        let mut node = self;
        for component in relative_dir.components() {
            if let Component::Normal(name) = component {
                node = node
                    .dirs
                    .entry(name.to_string_lossy().into_owned())
                    .or_default();
            }
        }
        node
    }
}

/// Renders the tree rooted at `root_label` and returns it together with the
/// traversal order of the file entries (indices into `entries`).
pub(crate) fn render_tree(
    root_label: &str,
    entries: &[FileEntry],
    dirs: &[PathBuf],
) -> (String, Vec<usize>) {
    let mut root = DirNode::default();
    for dir in dirs {
        root.dir_mut(dir);
    }
    for (index, entry) in entries.iter().enumerate() {
        let parent = entry.relative_path.parent().unwrap_or(Path::new(""));
        let name = entry
            .relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.relative_path.display().to_string());
        root.dir_mut(parent).files.insert(name, index);
    }

    let mut out = String::from("Directory structure:\n");
    let _ = writeln!(out, "└── {}/", root_label);
    let mut order = Vec::with_capacity(entries.len());
    render_node(&root, "    ", entries, &mut out, &mut order);
    (out, order)
}

fn render_node(
    node: &DirNode,
    prefix: &str,
    entries: &[FileEntry],
    out: &mut String,
    order: &mut Vec<usize>,
) {
    let total = node.dirs.len() + node.files.len();
    let mut position = 0;

    for (name, child) in &node.dirs {
        position += 1;
        let is_last = position == total;
        let connector = if is_last { "└── " } else { "├── " };
        let _ = writeln!(out, "{}{}{}/", prefix, connector, name);
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        render_node(child, &child_prefix, entries, out, order);
    }

    for (name, &index) in &node.files {
        position += 1;
        let connector = if position == total { "└── " } else { "├── " };
        match entries[index].status.annotation() {
            Some(note) => {
                let _ = writeln!(out, "{}{}{} {}", prefix, connector, name, note);
            }
            None => {
                let _ = writeln!(out, "{}{}{}", prefix, connector, name);
            }
        }
        order.push(index);
    }
}
