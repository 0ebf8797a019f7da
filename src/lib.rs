//! revbrief — code review context generator (library crate).
//!
//! Builds a structured review-context document for a project from three
//! inputs: a phase/subtask task list, an optional PRD, and the set of
//! changed files versus a git baseline (working tree, branch comparison,
//! or GitHub pull request). Re-exports public modules for integration
//! tests and external use.

pub mod changes;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod env;
pub mod generator;
pub mod github;
pub mod models;
pub mod prd;
pub mod providers;
pub mod render;
pub mod tasks;
pub mod tree;
