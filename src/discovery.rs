//! Locating the task-list and PRD files inside a project.
//!
//! Both lookups prefer the `tasks/` directory over the project root and
//! degrade to `None` when nothing matches; a missing file reduces the
//! document, it never aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{PRD_FILE_PLAIN, PRD_FILE_SUFFIX, TASK_FILE_PREFIX, TASKS_DIR};

/// Find the task-list and PRD files for a project.
pub fn find_project_files(project_path: &Path) -> (Option<PathBuf>, Option<PathBuf>) {
    (find_task_file(project_path), find_prd_file(project_path))
}

/// Newest `tasks-*.md` file, `tasks/` first, then the project root.
///
/// Numbered series sort by name, so "newest" is the lexicographically
/// last match.
fn find_task_file(root: &Path) -> Option<PathBuf> {
    for dir in [root.join(TASKS_DIR), root.to_path_buf()] {
        let found = last_matching(&dir, |name| {
            name.starts_with(TASK_FILE_PREFIX)
                && name.ends_with(".md")
                && !name.ends_with(PRD_FILE_SUFFIX)
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

/// A `*-prd.md` file (`tasks/` first, then root), falling back to a
/// plain `prd.md`.
fn find_prd_file(root: &Path) -> Option<PathBuf> {
    for dir in [root.join(TASKS_DIR), root.to_path_buf()] {
        let found = last_matching(&dir, |name| name.ends_with(PRD_FILE_SUFFIX));
        if found.is_some() {
            return found;
        }
    }
    for dir in [root.join(TASKS_DIR), root.to_path_buf()] {
        let plain = dir.join(PRD_FILE_PLAIN);
        if plain.is_file() {
            return Some(plain);
        }
    }
    None
}

fn last_matching(dir: &Path, matches: impl Fn(&str) -> bool) -> Option<PathBuf> {
    let read = fs::read_dir(dir).ok()?;
    let mut names: Vec<String> = read
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            (is_file && matches(&name)).then_some(name)
        })
        .collect();
    names.sort();
    names.pop().map(|name| dir.join(name))
}
