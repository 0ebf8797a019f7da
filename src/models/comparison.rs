//! Branch-comparison and pull-request data shapes.
//!
//! Mode dispatch in the assembler matches on the [`Comparison`] variant
//! tag; a context without a `Comparison` renders in plain mode.

/// One commit in a branch comparison.
///
/// Only `hash` and `message` are guaranteed; the renderer omits the
/// author and date lines gracefully when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub date_relative: Option<String>,
}

/// File-level summary counts for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub files_changed: usize,
    pub files_added: usize,
    pub files_modified: usize,
    pub files_deleted: usize,
}

/// Metadata for a comparison between two named branches.
///
/// `commits` carries the full history, newest first; the renderer lists
/// at most [`crate::constants::MAX_COMMITS_SHOWN`] entries while
/// "Commits Ahead" reports the full length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchComparison {
    pub source_branch: String,
    pub target_branch: String,
    pub commits: Vec<CommitInfo>,
    pub summary: ComparisonSummary,
}

/// Metadata for a hosted GitHub pull request, already fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// `owner/name` form.
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub source_sha: String,
    pub target_sha: String,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: String,
    pub summary: ComparisonSummary,
}

/// The comparison payload attached to a review context.
///
/// Absence implies plain mode; the assembler dispatches on this tag
/// rather than inspecting optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Branch(BranchComparison),
    GithubPr(PullRequest),
}
