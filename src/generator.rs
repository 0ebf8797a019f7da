//! The generate pipeline: discovery through document writing.
//!
//! Orchestrates the full run for one project: find the task list and
//! PRD, resolve the review scope, collect changed files for the
//! requested mode, render the document, and write it out. Optionally
//! sends the document back through the provider for a written review.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::changes::{self, ChangesError};
use crate::constants::{CONTEXT_FILE_PREFIX, REVIEW_FILE_PREFIX};
use crate::discovery;
use crate::env::Env;
use crate::github::{self, GithubError, PrLocator};
use crate::models::{ChangedFile, Comparison, ResolvedScope, ReviewContext};
use crate::prd;
use crate::providers::CompletionProvider;
use crate::render;
use crate::tasks::{self, TaskLookupError};
use crate::tree;

const REVIEW_SYSTEM_PROMPT: &str = "You are a senior software engineer performing a \
thorough code review. You receive a structured review context document containing a \
project summary, the current work phase with its completed tasks, a file tree, and \
the changed files under review. Review the changes for correctness, code quality, \
security, and alignment with the stated phase. Organize findings by priority, \
reference specific files, and suggest concrete improvements. Respond in markdown.";

/// Errors that abort a generate run.
///
/// Everything else (missing PRD or task list, no git repository,
/// unreachable GitHub, absent provider) degrades with a warning; the
/// collectors' module docs spell out each fallback.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Changes(#[from] ChangesError),

    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Lookup(#[from] TaskLookupError),

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved inputs for one generate run.
///
/// Scope validation has already happened; cross-flag conflicts are the
/// CLI's problem.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub project_path: PathBuf,
    pub scope: ResolvedScope,
    pub compare_branch: Option<String>,
    pub target_branch: Option<String>,
    pub github_pr: Option<String>,
    /// Explicit output file for the context document.
    pub output: Option<PathBuf>,
    /// Directory for generated files when no explicit output is given.
    pub output_dir: Option<PathBuf>,
    /// Print the document to stdout instead of writing it.
    pub raw: bool,
    /// Send the document through the provider for a written review.
    pub review: bool,
    pub quiet: bool,
}

impl GenerateOptions {
    pub fn new(project_path: impl Into<PathBuf>, scope: ResolvedScope) -> Self {
        Self {
            project_path: project_path.into(),
            scope,
            compare_branch: None,
            target_branch: None,
            github_pr: None,
            output: None,
            output_dir: None,
            raw: false,
            review: false,
            quiet: true,
        }
    }
}

/// What a run produced. `context_path` is `None` in raw mode.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub document: String,
    pub context_path: Option<PathBuf>,
    pub review_path: Option<PathBuf>,
}

/// Run the full pipeline for one project.
///
/// The provider is optional; without one the PRD-summary fallback and
/// the review step simply do nothing. The document itself is produced
/// whenever the scope resolves and the requested mode's inputs are
/// valid.
pub async fn generate(
    options: &GenerateOptions,
    provider: Option<&dyn CompletionProvider>,
    env: &Env,
) -> Result<GenerateOutcome, GenerateError> {
    let project_path = &options.project_path;

    if !options.quiet {
        eprintln!("Generating review context for {}", project_path.display());
    }

    let (task_file, prd_file) = discovery::find_project_files(project_path);

    let task_text = match &task_file {
        Some(path) => read_or_warn(path).await,
        None => String::new(),
    };
    let task_list = tasks::parse_task_list(&task_text);
    let selection = tasks::resolve_scope(&task_list, &options.scope)?;

    let prd_summary = match &prd_file {
        Some(path) => summarize_prd(&read_or_warn(path).await, provider).await,
        None => String::new(),
    };

    let (changed_files, comparison) = collect_changes(options, env).await?;
    let file_tree = tree::render_tree(project_path);

    let context = ReviewContext {
        prd_summary,
        selection,
        project_path: project_path.clone(),
        file_tree,
        changed_files,
        comparison,
    };
    let document = render::render_document(&context);

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let out_dir = resolve_output_dir(options);

    let context_path = if options.raw {
        None
    } else {
        let path = match &options.output {
            Some(file) => file.clone(),
            None => out_dir.join(format!(
                "{CONTEXT_FILE_PREFIX}-{}-{timestamp}.md",
                mode_slug(context.comparison.as_ref()),
            )),
        };
        write_document(&path, &document).await?;
        Some(path)
    };

    let review_path = if options.review {
        match send_for_review(&document, provider).await {
            Some(review) => {
                let path = out_dir.join(format!("{REVIEW_FILE_PREFIX}-{timestamp}.md"));
                write_document(&path, &review).await?;
                Some(path)
            }
            None => None,
        }
    } else {
        None
    };

    Ok(GenerateOutcome {
        document,
        context_path,
        review_path,
    })
}

/// Ask the provider for a written review of the document.
///
/// Any failure (no provider, API error, empty response) becomes `None`
/// with a warning; the run never fails because of the review step.
pub async fn send_for_review(
    document: &str,
    provider: Option<&dyn CompletionProvider>,
) -> Option<String> {
    let Some(provider) = provider else {
        eprintln!("Warning: review requested but no provider is configured");
        return None;
    };
    match provider.complete(REVIEW_SYSTEM_PROMPT, document).await {
        Ok(review) if !review.trim().is_empty() => Some(review),
        Ok(_) => {
            eprintln!("Warning: provider returned an empty review");
            None
        }
        Err(e) => {
            eprintln!("Warning: review generation failed: {e}");
            None
        }
    }
}

/// Collect changed files for the requested mode.
///
/// Branch mode failures are fatal since the caller named the branches.
/// A malformed PR locator is fatal too, but a failed fetch only warns
/// and falls back to working-tree collection.
async fn collect_changes(
    options: &GenerateOptions,
    env: &Env,
) -> Result<(Vec<ChangedFile>, Option<Comparison>), GenerateError> {
    if let Some(source) = &options.compare_branch {
        let target = match &options.target_branch {
            Some(target) => target.clone(),
            None => {
                let root = changes::git::find_repo_root(&options.project_path).await?;
                changes::git::detect_target_branch(Path::new(&root)).await
            }
        };
        let (files, comparison) =
            changes::collect_branch_changes(&options.project_path, source, &target).await?;
        return Ok((files, Some(Comparison::Branch(comparison))));
    }

    if let Some(locator_text) = &options.github_pr {
        let locator = PrLocator::parse(locator_text)?;
        match github::fetch_pull_request(&locator, env).await {
            Ok((mut pr, pr_files)) => {
                let (files, summary) = changes::normalize_pr_files(&pr_files);
                pr.summary = summary;
                return Ok((files, Some(Comparison::GithubPr(pr))));
            }
            Err(e) => {
                eprintln!(
                    "Warning: could not fetch {locator_text}: {e}; \
                     falling back to working tree changes"
                );
            }
        }
    }

    let files = changes::collect_working_changes(&options.project_path).await;
    Ok((files, None))
}

/// Extract the PRD summary, falling back to the provider when no
/// extraction strategy matches. Degrades to an empty string.
async fn summarize_prd(document: &str, provider: Option<&dyn CompletionProvider>) -> String {
    if document.trim().is_empty() {
        return String::new();
    }
    if let Some(summary) = prd::extract_summary(document) {
        return summary;
    }
    let Some(provider) = provider else {
        return String::new();
    };
    match prd::summarize_with(provider, document).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Warning: PRD summary fallback failed: {e}");
            String::new()
        }
    }
}

async fn read_or_warn(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Warning: could not read {}: {e}", path.display());
            String::new()
        }
    }
}

/// Directory generated files land in: next to an explicit output file,
/// else the configured directory, else the project root.
fn resolve_output_dir(options: &GenerateOptions) -> PathBuf {
    options
        .output
        .as_ref()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| options.output_dir.clone())
        .unwrap_or_else(|| options.project_path.clone())
}

/// Filename discriminator for the active mode.
fn mode_slug(comparison: Option<&Comparison>) -> &'static str {
    match comparison {
        None => "working",
        Some(Comparison::Branch(_)) => "branch-comparison",
        Some(Comparison::GithubPr(_)) => "github-pr",
    }
}

async fn write_document(path: &Path, document: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| GenerateError::WriteFile {
                path: path.to_path_buf(),
                source: e,
            })?;
    }
    tokio::fs::write(path, document)
        .await
        .map_err(|e| GenerateError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
}
