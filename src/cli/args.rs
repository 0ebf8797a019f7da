//! Clap argument types and cross-flag validation.

use clap::Parser;
use std::path::PathBuf;

use revbrief::models::{ResolvedScope, Scope};

/// Generate code review context from task lists, PRDs, and git changes.
#[derive(Parser, Debug)]
#[command(name = "revbrief", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate a review context document.
    Generate(Box<GenerateArgs>),

    /// Print the resolved configuration.
    Config(ConfigArgs),
}

/// Arguments for the `config` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Path to the project directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    // --- Project location ---
    /// Path to the project directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    // --- Scope ---
    /// Portion of the task list to cover (default: recent_phase).
    #[arg(long)]
    pub scope: Option<Scope>,

    /// Phase to review, e.g. 2.0. Implies --scope specific_phase.
    #[arg(long, value_name = "N.0")]
    pub phase_number: Option<String>,

    /// Task to review, e.g. 2.3. Implies --scope specific_task.
    #[arg(long, value_name = "N.M")]
    pub task_number: Option<String>,

    // --- Change source (default: uncommitted working-tree changes) ---
    /// Review a branch against the target branch instead of the working tree.
    #[arg(long, value_name = "BRANCH")]
    pub compare_branch: Option<String>,

    /// Branch to compare against (default: detected from origin/HEAD, else main).
    #[arg(long, value_name = "BRANCH", requires = "compare_branch")]
    pub target_branch: Option<String>,

    /// Review a GitHub pull request: URL or owner/repo#N.
    #[arg(long, value_name = "PR", conflicts_with = "compare_branch")]
    pub github_pr: Option<String>,

    // --- Output ---
    /// Write the document to this file instead of the timestamped default.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file.
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    pub raw: bool,

    // --- Review ---
    /// Send the document to the configured LLM provider for a written review.
    #[arg(long, default_value_t = false)]
    pub review: bool,

    /// Skip the LLM review even when enabled in config.
    #[arg(long, default_value_t = false, conflicts_with = "review")]
    pub no_review: bool,

    /// Suppress progress output. Only errors are shown.
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}

impl GenerateArgs {
    /// Resolve the effective scope and validate its identifiers.
    ///
    /// `--phase-number` and `--task-number` imply their scopes when
    /// `--scope` is not given explicitly. Identifiers supplied for scopes
    /// that do not use them are ignored.
    pub fn validate(&self) -> Result<ResolvedScope, String> {
        let scope = match self.scope {
            Some(scope) => scope,
            None if self.phase_number.is_some() => Scope::SpecificPhase,
            None if self.task_number.is_some() => Scope::SpecificTask,
            None => Scope::RecentPhase,
        };
        scope
            .validate(self.phase_number.as_deref(), self.task_number.as_deref())
            .map_err(|e| e.to_string())
    }
}
