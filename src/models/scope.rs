//! Review scope selection and identifier validation.
//!
//! Scope parameters are validated before any file or process I/O; a bad
//! combination is the only fatal input error in the pipeline.

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Phase identifiers are `N.0`.
static PHASE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.0$").expect("phase number regex"));

/// Task identifiers are `N.M` where M has a nonzero value.
static TASK_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("task number regex"));

/// Validation failures for scope parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("phase_number is required for specific_phase scope")]
    MissingPhaseNumber,

    #[error("task_number is required for specific_task scope")]
    MissingTaskNumber,

    #[error("Invalid phase_number format: '{value}' (expected a phase id like '2.0')")]
    InvalidPhaseNumber { value: String },

    #[error("Invalid task_number format: '{value}' (expected a task id like '2.3')")]
    InvalidTaskNumber { value: String },
}

/// What portion of the task list the review covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Scope {
    /// Every phase, anchored at the last one.
    FullProject,
    /// The most recently completed phase, else the first (the default).
    #[default]
    RecentPhase,
    /// One named phase (`--phase-number`).
    SpecificPhase,
    /// One named task within its enclosing phase (`--task-number`).
    SpecificTask,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::FullProject => "full_project",
            Scope::RecentPhase => "recent_phase",
            Scope::SpecificPhase => "specific_phase",
            Scope::SpecificTask => "specific_task",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_project" => Ok(Scope::FullProject),
            "recent_phase" => Ok(Scope::RecentPhase),
            "specific_phase" => Ok(Scope::SpecificPhase),
            "specific_task" => Ok(Scope::SpecificTask),
            other => Err(format!(
                "unknown scope: '{other}'. Supported: full_project, recent_phase, \
                 specific_phase, specific_task"
            )),
        }
    }
}

/// A scope whose identifiers have passed format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedScope {
    FullProject,
    RecentPhase,
    SpecificPhase(String),
    SpecificTask(String),
}

impl Scope {
    /// Validate scope parameters and bind the relevant identifier.
    ///
    /// Runs before any I/O. Identifiers supplied for scopes that do not
    /// use them are ignored.
    pub fn validate(
        self,
        phase_number: Option<&str>,
        task_number: Option<&str>,
    ) -> Result<ResolvedScope, ScopeError> {
        match self {
            Scope::FullProject => Ok(ResolvedScope::FullProject),
            Scope::RecentPhase => Ok(ResolvedScope::RecentPhase),
            Scope::SpecificPhase => {
                let value = phase_number.ok_or(ScopeError::MissingPhaseNumber)?;
                if !PHASE_NUMBER_RE.is_match(value) {
                    return Err(ScopeError::InvalidPhaseNumber {
                        value: value.to_string(),
                    });
                }
                Ok(ResolvedScope::SpecificPhase(value.to_string()))
            }
            Scope::SpecificTask => {
                let value = task_number.ok_or(ScopeError::MissingTaskNumber)?;
                if !is_valid_task_number(value) {
                    return Err(ScopeError::InvalidTaskNumber {
                        value: value.to_string(),
                    });
                }
                Ok(ResolvedScope::SpecificTask(value.to_string()))
            }
        }
    }
}

/// `N.M` where the minor component is nonzero (`1.0` names a phase, not a task).
fn is_valid_task_number(value: &str) -> bool {
    if !TASK_NUMBER_RE.is_match(value) {
        return false;
    }
    match value.split_once('.') {
        Some((_, minor)) => !minor.chars().all(|c| c == '0'),
        None => false,
    }
}
