//! Shared types used across all modules.
//!
//! This module defines the core data structures for parsed task lists,
//! changed files, branch/PR comparisons, and the assembled review
//! context. Other modules import from here rather than reaching into
//! each other's internals.

pub mod comparison;
pub mod scope;
pub mod tasks;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use comparison::{BranchComparison, CommitInfo, Comparison, ComparisonSummary, PullRequest};
pub use scope::{ResolvedScope, Scope, ScopeError};
pub use tasks::{Phase, PhaseSelection, Subtask, TaskList};

/// A file touched by the comparison in effect.
///
/// `status` carries the mode-specific token: `M`/`A`/`D` for working-tree
/// diffs, `branch-M`/`branch-A`/`branch-D` for branch comparisons, and
/// `PR-modified`/`PR-added`/`PR-deleted`/`PR-renamed` for pull requests.
/// `content` holds the full file text, or [`crate::constants::BINARY_SENTINEL`]
/// when the file could not be read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: String,
    pub content: String,
}

/// The assembled input bag for the template assembler.
///
/// Built once per invocation and never mutated after assembly begins.
/// `comparison` being `None` implies plain mode.
#[derive(Debug, Clone)]
pub struct ReviewContext {
    pub prd_summary: String,
    pub selection: PhaseSelection,
    pub project_path: PathBuf,
    pub file_tree: String,
    pub changed_files: Vec<ChangedFile>,
    pub comparison: Option<Comparison>,
}

/// Supported LLM provider backends for the summarization/review calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    Gemini,
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::Gemini => write!(f, "gemini"),
            ProviderName::Anthropic => write!(f, "anthropic"),
            ProviderName::OpenAI => write!(f, "openai"),
            ProviderName::OpenAICompatible => write!(f, "openai-compatible"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderName::Gemini),
            "anthropic" => Ok(ProviderName::Anthropic),
            "openai" => Ok(ProviderName::OpenAI),
            "openai-compatible" => Ok(ProviderName::OpenAICompatible),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: gemini, anthropic, openai, \
                 openai-compatible"
            )),
        }
    }
}

impl ProviderName {
    /// Returns the provider-specific environment variable name for the API key.
    ///
    /// These match the env var names used by rig-core's `from_env()` implementations.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
        }
    }
}
