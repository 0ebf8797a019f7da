//! Integration tests assembling full review-context documents.
//!
//! Drives the public API from markdown task-list text through scope
//! resolution and document rendering, without touching git or the
//! network.

use std::path::PathBuf;

use revbrief::models::{
    BranchComparison, Comparison, PhaseSelection, PullRequest, ResolvedScope, ReviewContext,
};
use revbrief::prd::extract_summary;
use revbrief::render::render_document;
use revbrief::tasks::{parse_task_list, resolve_scope};

/// Phase 1.0 fully complete, phase 2.0 in progress.
const AUTH_TASKS: &str = "\
## Relevant Files

- `src/auth.rs` - Session handling

## Tasks

- [x] 1.0 Project setup
  - [x] 1.1 Initialize repository
  - [x] 1.2 Configure tooling
- [ ] 2.0 Core features
  - [x] 2.1 Login endpoint
  - [ ] 2.2 Session handling
";

fn assemble(task_text: &str, scope: &ResolvedScope) -> String {
    let tasks = parse_task_list(task_text);
    let selection = resolve_scope(&tasks, scope).unwrap();
    let context = ReviewContext {
        prd_summary: String::new(),
        selection,
        project_path: PathBuf::from("/work/demo"),
        file_tree: "/work/demo\n└── src/".to_string(),
        changed_files: Vec::new(),
        comparison: None,
    };
    render_document(&context)
}

// ---------------------------------------------------------------------------
// phase selection through the document
// ---------------------------------------------------------------------------

#[test]
fn completed_first_phase_is_selected_for_review() {
    let document = assemble(AUTH_TASKS, &ResolvedScope::RecentPhase);

    assert!(document.contains("<total_phases>\n2\n</total_phases>"));
    assert!(document.contains("<current_phase_number>\n1.0\n</current_phase_number>"));
    // First phase selected, so there is no previous phase.
    assert!(document.contains("<previous_phase_completed>\n</previous_phase_completed>"));
    assert!(document.contains("<next_phase>\n2.0 Core features\n</next_phase>"));
    assert!(document.contains("- 1.1 Initialize repository"));
    assert!(document.contains("- 1.2 Configure tooling"));
    assert!(!document.contains("- 2.1 Login endpoint"));
}

#[test]
fn first_phase_selected_when_none_complete() {
    let text = "- [ ] 1.0 Alpha\n  - [x] 1.1 Begin\n- [ ] 2.0 Beta\n";
    let document = assemble(text, &ResolvedScope::RecentPhase);

    assert!(document.contains("<current_phase_number>\n1.0\n</current_phase_number>"));
    assert!(document.contains("- 1.1 Begin"));
}

#[test]
fn total_phases_counts_phase_lines_regardless_of_state() {
    let text = "- [x] 1.0 One\n- [ ] 2.0 Two\n- [x] 3.0 Three\n- [ ] 4.0 Four\n";
    let document = assemble(text, &ResolvedScope::RecentPhase);

    assert!(document.contains("<total_phases>\n4\n</total_phases>"));
    // The last completed phase anchors the selection.
    assert!(document.contains("<current_phase_number>\n3.0\n</current_phase_number>"));
    assert!(document.contains("<previous_phase_completed>\n2.0 Two\n</previous_phase_completed>"));
    assert!(document.contains("<next_phase>\n4.0 Four\n</next_phase>"));
}

#[test]
fn full_project_scope_aggregates_completed_subtasks() {
    let document = assemble(AUTH_TASKS, &ResolvedScope::FullProject);

    assert!(document.contains("<current_phase_number>\n2.0\n</current_phase_number>"));
    assert!(document.contains("<previous_phase_completed>\n1.0 Project setup\n</previous_phase_completed>"));
    assert!(document.contains("- 1.1 Initialize repository"));
    assert!(document.contains("- 2.1 Login endpoint"));
    assert!(!document.contains("- 2.2 Session handling"));
}

#[test]
fn specific_task_scope_narrows_to_one_task() {
    let document = assemble(AUTH_TASKS, &ResolvedScope::SpecificTask("2.1".to_string()));

    assert!(document.contains("<current_phase_number>\n2.0\n</current_phase_number>"));
    assert!(document.contains("- 2.1 Login endpoint"));
    assert!(!document.contains("- 1.1 Initialize repository"));
}

#[test]
fn unknown_phase_reports_available_phases() {
    let tasks = parse_task_list(AUTH_TASKS);
    let err = resolve_scope(&tasks, &ResolvedScope::SpecificPhase("7.0".to_string()))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "phase '7.0' not found in the task list (available: 1.0, 2.0)"
    );
}

#[test]
fn nested_checkbox_lines_each_count_once() {
    let text = "\
- [x] 1.0 Build
  - [x] 1.1 Parser
    - [x] 1.1.1 Lexer
  - [x] 1.2 Renderer
";
    let document = assemble(text, &ResolvedScope::RecentPhase);

    assert!(document.contains("- 1.1 Parser"));
    assert!(document.contains("- 1.1.1 Lexer"));
    assert!(document.contains("- 1.2 Renderer"));
}

// ---------------------------------------------------------------------------
// PRD summary through the document
// ---------------------------------------------------------------------------

#[test]
fn prd_summary_flows_into_document_excluding_goals() {
    let prd = "\
# Demo

## Summary

A service that issues and validates session tokens.

## Goals

- Key rotation without downtime
";
    let tasks = parse_task_list(AUTH_TASKS);
    let selection = resolve_scope(&tasks, &ResolvedScope::RecentPhase).unwrap();
    let context = ReviewContext {
        prd_summary: extract_summary(prd).unwrap(),
        selection,
        project_path: PathBuf::from("/work/demo"),
        file_tree: String::new(),
        changed_files: Vec::new(),
        comparison: None,
    };
    let document = render_document(&context);

    assert!(document.contains(
        "<overall_prd_summary>\nA service that issues and validates session tokens.\n</overall_prd_summary>"
    ));
    assert!(!document.contains("Key rotation"));
}

// ---------------------------------------------------------------------------
// tag pairing across modes
// ---------------------------------------------------------------------------

#[test]
fn core_tags_pair_in_every_mode() {
    let comparisons = [
        None,
        Some(Comparison::Branch(BranchComparison::default())),
        Some(Comparison::GithubPr(PullRequest::default())),
    ];
    for comparison in comparisons {
        let context = ReviewContext {
            prd_summary: String::new(),
            selection: PhaseSelection::default(),
            project_path: PathBuf::from("/p"),
            file_tree: String::new(),
            changed_files: Vec::new(),
            comparison,
        };
        let document = render_document(&context);
        for tag in [
            "overall_prd_summary",
            "file_tree",
            "files_changed",
            "user_instructions",
        ] {
            assert!(document.contains(&format!("<{tag}>")), "missing <{tag}>");
            assert!(document.contains(&format!("</{tag}>")), "missing </{tag}>");
        }
    }
}
