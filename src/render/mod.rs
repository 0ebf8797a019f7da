//! Review-context document assembly.
//!
//! One flat sequence of paired tags, stable names, same skeleton in
//! every mode. Consumers parse by tag name, so every opening tag gets
//! its closing tag even when the body is empty.

pub mod instructions;

use crate::constants::{MAX_COMMITS_SHOWN, MAX_PR_BODY_CHARS};
use crate::models::{
    BranchComparison, ChangedFile, Comparison, PullRequest, ReviewContext,
};

/// Assemble the full review-context document.
///
/// Mode dispatch is driven by the comparison payload: absent means a
/// plain working-tree review, otherwise the payload's variant selects
/// the branch-comparison or pull-request layout.
pub fn render_document(context: &ReviewContext) -> String {
    let selection = &context.selection;
    let mut out = String::new();

    push_tagged(&mut out, "overall_prd_summary", &context.prd_summary);
    push_tagged(&mut out, "total_phases", &selection.total_phases.to_string());
    push_tagged(
        &mut out,
        "current_phase_number",
        &selection.current_phase_number,
    );
    push_tagged(
        &mut out,
        "previous_phase_completed",
        &selection.previous_phase_completed,
    );
    push_tagged(&mut out, "next_phase", &selection.next_phase);
    push_tagged(
        &mut out,
        "current_phase_description",
        &selection.current_phase_description,
    );
    push_tagged(
        &mut out,
        "subtasks_completed",
        &bullet_list(&selection.subtasks_completed),
    );
    push_tagged(
        &mut out,
        "project_path",
        &context.project_path.display().to_string(),
    );
    push_tagged(&mut out, "file_tree", &context.file_tree);
    push_tagged(
        &mut out,
        "files_changed",
        &changed_files_block(&context.changed_files),
    );

    match &context.comparison {
        None => {}
        Some(Comparison::Branch(comparison)) => {
            push_tagged(
                &mut out,
                "branch_comparison_metadata",
                &branch_metadata_block(comparison),
            );
            push_tagged(
                &mut out,
                "commit_information",
                &commit_information_block(comparison),
            );
            push_tagged(
                &mut out,
                "branch_statistics",
                &branch_statistics_block(comparison),
            );
        }
        Some(Comparison::GithubPr(pr)) => {
            push_tagged(&mut out, "github_pr_metadata", &pr_metadata_block(pr));
        }
    }

    let footer = match &context.comparison {
        None => instructions::plain(selection),
        Some(Comparison::Branch(comparison)) => instructions::branch_comparison(comparison),
        Some(Comparison::GithubPr(pr)) => instructions::github_pr(pr),
    };
    push_tagged(&mut out, "user_instructions", &footer);

    // Blocks separate with a blank line; the document ends with one newline.
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// Append one `<tag>...</tag>` section followed by a blank line.
fn push_tagged(out: &mut String, tag: &str, body: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(">\n");
    let trimmed = body.trim_end_matches('\n');
    if !trimmed.is_empty() {
        out.push_str(trimmed);
        out.push('\n');
    }
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n\n");
}

fn bullet_list(entries: &[String]) -> String {
    entries
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn changed_files_block(files: &[ChangedFile]) -> String {
    files
        .iter()
        .map(|f| {
            format!(
                "File: {} (Status: {})\n```\n{}\n```",
                f.path,
                f.status,
                f.content.trim_end_matches('\n')
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn branch_metadata_block(comparison: &BranchComparison) -> String {
    let summary = &comparison.summary;
    format!(
        "Branch Comparison Review\n\
         Source Branch: {}\n\
         Target Branch: {}\n\
         Files Changed: {}\n\
         Files Added: {}\n\
         Files Modified: {}\n\
         Files Deleted: {}\n\
         Commits Ahead: {}",
        comparison.source_branch,
        comparison.target_branch,
        summary.files_changed,
        summary.files_added,
        summary.files_modified,
        summary.files_deleted,
        comparison.commits.len(),
    )
}

fn commit_information_block(comparison: &BranchComparison) -> String {
    let mut s = String::from("Commit History (showing changes from target to source branch)\n");
    for (i, commit) in comparison
        .commits
        .iter()
        .take(MAX_COMMITS_SHOWN)
        .enumerate()
    {
        s.push_str(&format!("{}. Commit: {}\n", i + 1, commit.hash));
        s.push_str(&format!("   Message: {}\n", commit.message));
        if let Some(author) = &commit.author {
            s.push_str(&format!("   Author: {author}\n"));
        }
        match (&commit.date, &commit.date_relative) {
            (Some(date), Some(relative)) => {
                s.push_str(&format!("   Date: {date} ({relative})\n"));
            }
            (Some(date), None) => s.push_str(&format!("   Date: {date}\n")),
            (None, Some(relative)) => s.push_str(&format!("   Date: {relative}\n")),
            (None, None) => {}
        }
    }
    s
}

fn branch_statistics_block(comparison: &BranchComparison) -> String {
    format!(
        "Comparison Summary:\n\
         {} ({} commits ahead)\n\
         {} files changed relative to {}",
        comparison.source_branch,
        comparison.commits.len(),
        comparison.summary.files_changed,
        comparison.target_branch,
    )
}

fn pr_metadata_block(pr: &PullRequest) -> String {
    let summary = &pr.summary;
    format!(
        "GitHub PR Review\n\
         Repository: {}\n\
         PR Number: {}\n\
         Title: {}\n\
         Author: {}\n\
         Source Branch: {}\n\
         Target Branch: {}\n\
         Source SHA: {}\n\
         Target SHA: {}\n\
         State: {}\n\
         Created: {}\n\
         Updated: {}\n\
         Description: {}\n\
         Files Changed: {}\n\
         Files Added: {}\n\
         Files Modified: {}\n\
         Files Deleted: {}",
        pr.repository,
        pr.number,
        pr.title,
        pr.author,
        pr.source_branch,
        pr.target_branch,
        short_sha(&pr.source_sha),
        short_sha(&pr.target_sha),
        pr.state,
        pr.created_at,
        pr.updated_at,
        truncate_body(&pr.body),
        summary.files_changed,
        summary.files_added,
        summary.files_modified,
        summary.files_deleted,
    )
}

/// First 8 characters of a SHA followed by `...`.
fn short_sha(sha: &str) -> String {
    let head: String = sha.chars().take(8).collect();
    format!("{head}...")
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_PR_BODY_CHARS {
        return body.to_string();
    }
    let head: String = body.chars().take(MAX_PR_BODY_CHARS).collect();
    format!("{head}...")
}
