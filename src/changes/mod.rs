//! Changed-file collection for the three review modes.
//!
//! Working-tree collection degrades to an empty list whenever git is
//! unavailable or the path is not a repository; the document must still
//! come out. Branch comparison is an explicit request, so unresolvable
//! branches there are reported as errors instead.

pub mod git;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::BINARY_SENTINEL;
use crate::github::PrFile;
use crate::models::{BranchComparison, ChangedFile, ComparisonSummary};

/// Errors from change collection.
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("git command failed: {0}")]
    GitError(String),

    #[error("not a git repository: {0}")]
    NotARepository(String),

    #[error("branch '{0}' does not exist in this repository")]
    BranchNotFound(String),
}

/// Collect uncommitted working-tree changes.
///
/// Lists committed-but-modified paths against `HEAD` plus untracked
/// files (reported as `A`), then reads each file's current content.
/// Unreadable or non-UTF-8 content becomes the binary sentinel. Never
/// fails: outside a repository the list is simply empty.
pub async fn collect_working_changes(project_path: &Path) -> Vec<ChangedFile> {
    let Ok(root) = git::find_repo_root(project_path).await else {
        return Vec::new();
    };
    let root = PathBuf::from(root);

    // HEAD may not exist yet in a fresh repository; untracked listing
    // still works there, so the two listings degrade independently.
    let mut entries = git::diff_name_status(&root, "HEAD").await.unwrap_or_default();
    let untracked = git::untracked_files(&root).await.unwrap_or_default();
    entries.extend(untracked.into_iter().map(|path| ("A".to_string(), path)));

    let mut files = Vec::with_capacity(entries.len());
    for (status, path) in entries {
        let content = read_file_content(&root.join(&path)).await;
        files.push(ChangedFile {
            path,
            status,
            content,
        });
    }
    files
}

/// Collect the changes `source` introduces relative to `target`.
///
/// Statuses are tagged with branch provenance (`branch-M`, `branch-A`,
/// ...), content comes from the source branch's version of each file,
/// and the returned comparison carries the commit history plus summary
/// counts.
pub async fn collect_branch_changes(
    project_path: &Path,
    source: &str,
    target: &str,
) -> Result<(Vec<ChangedFile>, BranchComparison), ChangesError> {
    let root = PathBuf::from(git::find_repo_root(project_path).await?);
    git::verify_branch(&root, source).await?;
    git::verify_branch(&root, target).await?;

    // Three-dot range: changes on source since it diverged from target.
    let entries = git::diff_name_status(&root, &format!("{target}...{source}")).await?;
    let mut files = Vec::with_capacity(entries.len());
    let mut summary = ComparisonSummary {
        files_changed: entries.len(),
        ..Default::default()
    };
    for (status, path) in entries {
        match status.chars().next() {
            Some('A') => summary.files_added += 1,
            Some('M') => summary.files_modified += 1,
            Some('D') => summary.files_deleted += 1,
            _ => {}
        }
        let content = match git::show_file(&root, source, &path).await {
            Ok(text) => text,
            Err(_) => BINARY_SENTINEL.to_string(),
        };
        files.push(ChangedFile {
            path,
            status: format!("branch-{status}"),
            content,
        });
    }

    let commits = git::list_commits(&root, source, target).await?;
    let comparison = BranchComparison {
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        commits,
        summary,
    };
    Ok((files, comparison))
}

/// Normalize hosted-PR file records into the changed-file shape.
///
/// Statuses become `PR-<status>`; the patch hunk stands in for file
/// content, with the binary sentinel for files the API returns no patch
/// for.
pub fn normalize_pr_files(files: &[PrFile]) -> (Vec<ChangedFile>, ComparisonSummary) {
    let mut summary = ComparisonSummary {
        files_changed: files.len(),
        ..Default::default()
    };
    let normalized = files
        .iter()
        .map(|f| {
            match f.status.as_str() {
                "added" => summary.files_added += 1,
                "modified" | "changed" => summary.files_modified += 1,
                "removed" => summary.files_deleted += 1,
                _ => {}
            }
            ChangedFile {
                path: f.filename.clone(),
                status: format!("PR-{}", f.status),
                content: f
                    .patch
                    .clone()
                    .unwrap_or_else(|| BINARY_SENTINEL.to_string()),
            }
        })
        .collect();
    (normalized, summary)
}

async fn read_file_content(path: &Path) -> String {
    match tokio::fs::read(path).await {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => BINARY_SENTINEL.to_string(),
        },
        Err(_) => BINARY_SENTINEL.to_string(),
    }
}
