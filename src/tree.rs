//! Gitignore-aware directory tree rendering.
//!
//! Produces the classic connector layout:
//!
//! ```text
//! /path/to/project
//! ├── src/
//! │   ├── lib.rs
//! │   └── main.rs
//! └── README.md
//! ```

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// One directory entry, pre-classified for ordering.
struct Entry {
    name: String,
    is_dir: bool,
}

/// Render the project as an indented tree.
///
/// Patterns from the project's `.gitignore` (when present) are excluded
/// with standard ignore-glob semantics, and `.git` itself is never
/// listed. Directories sort before files, each group by name, so the
/// output is stable across runs. The root path is the first line,
/// un-prefixed; unreadable directories render as empty.
pub fn render_tree(project_path: &Path) -> String {
    let matcher = load_ignore(project_path);
    let mut lines = vec![project_path.display().to_string()];
    render_children(project_path, project_path, matcher.as_ref(), "", &mut lines);
    lines.join("\n")
}

fn render_children(
    root: &Path,
    dir: &Path,
    matcher: Option<&Gitignore>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let entries = list_entries(root, dir, matcher);
    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        if entry.is_dir {
            lines.push(format!("{prefix}{connector}{}/", entry.name));
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            render_children(root, &dir.join(&entry.name), matcher, &child_prefix, lines);
        } else {
            lines.push(format!("{prefix}{connector}{}", entry.name));
        }
    }
}

/// List one directory's children: ignored paths and `.git` dropped,
/// subdirectories before files, names sorted within each group.
fn list_entries(root: &Path, dir: &Path, matcher: Option<&Gitignore>) -> Vec<Entry> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in read.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == ".git" {
            continue;
        }
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if let Some(m) = matcher {
            let rel = entry.path();
            let rel = rel.strip_prefix(root).unwrap_or(&rel);
            if m.matched(rel, is_dir).is_ignore() {
                continue;
            }
        }
        if is_dir {
            dirs.push(Entry { name, is_dir });
        } else {
            files.push(Entry { name, is_dir });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.extend(files);
    dirs
}

fn load_ignore(root: &Path) -> Option<Gitignore> {
    let file = root.join(".gitignore");
    if !file.is_file() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    builder.add(&file);
    builder.build().ok()
}
