//! Git CLI wrappers for change collection.
//!
//! Shells out to `git` via `tokio::process::Command`. Callers decide
//! which failures degrade and which propagate.

use std::path::Path;

use super::ChangesError;
use crate::models::CommitInfo;

/// Find the root of the git repository containing `start_dir`.
pub async fn find_repo_root(start_dir: &Path) -> Result<String, ChangesError> {
    let output = tokio::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangesError::NotARepository(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Check that a branch (or any rev) resolves in the repository.
pub async fn verify_branch(repo_root: &Path, name: &str) -> Result<(), ChangesError> {
    let output = tokio::process::Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", name])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(ChangesError::BranchNotFound(name.to_string()));
    }
    Ok(())
}

/// Run `git diff --name-status <range>` and parse `<status>\t<path>` lines.
///
/// Rename entries carry two paths; the reported path is the destination.
pub async fn diff_name_status(
    repo_root: &Path,
    range: &str,
) -> Result<Vec<(String, String)>, ChangesError> {
    let output = tokio::process::Command::new("git")
        .args(["diff", "--name-status", range])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangesError::GitError(format!(
            "git diff --name-status failed (exit {}): {stderr}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_name_status(&stdout))
}

/// Untracked files reported by `git ls-files --others --exclude-standard`.
pub async fn untracked_files(repo_root: &Path) -> Result<Vec<String>, ChangesError> {
    let output = tokio::process::Command::new("git")
        .args(["ls-files", "--others", "--exclude-standard"])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangesError::GitError(format!(
            "git ls-files failed (exit {}): {stderr}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Fetch a file's content at a given rev via `git show <rev>:<path>`.
///
/// Errors on non-zero exit and on non-UTF-8 content; the caller
/// substitutes the binary sentinel in both cases.
pub async fn show_file(repo_root: &Path, rev: &str, path: &str) -> Result<String, ChangesError> {
    let output = tokio::process::Command::new("git")
        .args(["show", &format!("{rev}:{path}")])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangesError::GitError(format!(
            "git show failed (exit {}): {stderr}",
            output.status
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| ChangesError::GitError(format!("file content is not valid UTF-8: {e}")))
}

/// Commits on `source` that are not on `target`, newest first.
pub async fn list_commits(
    repo_root: &Path,
    source: &str,
    target: &str,
) -> Result<Vec<CommitInfo>, ChangesError> {
    let output = tokio::process::Command::new("git")
        .args([
            "log",
            &format!("{target}..{source}"),
            "--pretty=format:%h%x09%s%x09%an%x09%aI%x09%ar",
        ])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| ChangesError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangesError::GitError(format!(
            "git log failed (exit {}): {stderr}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter_map(parse_commit_line).collect())
}

/// Best-effort default review target for branch comparisons.
///
/// Tries the remote HEAD first, then local `main` / `master`, and
/// settles on `main` when nothing resolves.
pub async fn detect_target_branch(repo_root: &Path) -> String {
    if let Ok(output) = tokio::process::Command::new("git")
        .args(["symbolic-ref", "--short", "refs/remotes/origin/HEAD"])
        .current_dir(repo_root)
        .output()
        .await
        && output.status.success()
    {
        let head = String::from_utf8_lossy(&output.stdout).trim().to_string();
        // Reported as "origin/main"; the local name is what we compare against.
        if let Some(name) = head.rsplit('/').next()
            && !name.is_empty()
        {
            return name.to_string();
        }
    }

    for candidate in ["main", "master"] {
        if verify_branch(repo_root, candidate).await.is_ok() {
            return candidate.to_string();
        }
    }

    "main".to_string()
}

fn parse_name_status(listing: &str) -> Vec<(String, String)> {
    listing
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let status = parts.next()?.trim();
            let path = parts.next_back()?.trim();
            if status.is_empty() || path.is_empty() {
                return None;
            }
            Some((status.to_string(), path.to_string()))
        })
        .collect()
}

fn parse_commit_line(line: &str) -> Option<CommitInfo> {
    let mut parts = line.split('\t');
    let hash = parts.next()?.trim();
    let message = parts.next()?.trim();
    if hash.is_empty() {
        return None;
    }
    let opt = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Some(CommitInfo {
        hash: hash.to_string(),
        message: message.to_string(),
        author: opt(parts.next()),
        date: opt(parts.next()),
        date_relative: opt(parts.next()),
    })
}
