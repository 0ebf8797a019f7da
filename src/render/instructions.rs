//! Reviewer instructions appended to the assembled document.
//!
//! Each mode gets its own guidance; the wording differs because the
//! reviewer's vantage point differs (working tree, branch delta, or a
//! hosted PR).

use crate::models::{BranchComparison, PhaseSelection, PullRequest};

/// Footer for plain working-tree reviews.
pub fn plain(selection: &PhaseSelection) -> String {
    let mut s = String::new();
    if selection.current_phase_number.is_empty() {
        s.push_str("You are reviewing the current state of this project.\n\n");
    } else {
        s.push_str(&format!(
            "We have just completed phase {} (\"{}\"). The changed files above \
             contain the work done in this phase.\n\n",
            selection.current_phase_number, selection.current_phase_description
        ));
    }
    s.push_str(
        "Based on the PRD summary, the completed subtasks, and the changed files, \
         conduct a thorough code review. Identify bugs, missing requirements, and \
         opportunities for improvement, referencing specific files and lines where \
         possible.",
    );
    s
}

/// Footer for branch-comparison reviews.
pub fn branch_comparison(comparison: &BranchComparison) -> String {
    format!(
        "You are reviewing changes between git branches. The files above show the \
         state of '{source}' and represent the work proposed for merging into \
         '{target}'.\n\n\
         Focus your review on:\n\
         - Changes introduced in this branch compared to the target branch\n\
         - Review the commit progression to understand how the work evolved\n\
         - Whether the branch fulfils the PRD and the current phase's subtasks\n\
         - Correctness, completeness, and code quality of the modified files",
        source = comparison.source_branch,
        target = comparison.target_branch,
    )
}

/// Footer for GitHub pull-request reviews.
pub fn github_pr(pr: &PullRequest) -> String {
    format!(
        "You are reviewing a GitHub Pull Request. The PR \"{title}\" by {author} \
         proposes merging '{source}' into '{target}'; the changed files above \
         contain the patches fetched from the hosted repository.\n\n\
         Focus your review on:\n\
         - Code quality and best practices\n\
         - Security implications of the changes\n\
         - Whether the changes match the PR description and the PRD\n\
         - Regressions the merge could introduce in the target branch",
        title = pr.title,
        author = pr.author,
        source = pr.source_branch,
        target = pr.target_branch,
    )
}
