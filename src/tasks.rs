//! Task-list parsing and current-phase selection.
//!
//! Recognizes the two-level checkbox convention used by task-list files:
//!
//! ```text
//! - [x] 1.0 Phase heading
//!   - [x] 1.1 Subtask
//!   - [ ] 1.2 Subtask
//! ```
//!
//! Phase lines carry an `N.0` identifier at the document's top-level
//! indent; subtask lines carry identifiers with two or more numeric
//! components and attach to the most recently opened phase. Anything
//! else is ignored. This is not a markdown parser.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{Phase, PhaseSelection, ResolvedScope, Subtask, TaskList};

/// Checkbox list item: indent, mark, and the rest of the line.
static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)-\s*\[\s*([xX]?)\s*\]\s*(.*)$").expect("checkbox regex")
});

/// Numeric identifier with at least two dot-separated components,
/// followed by a description.
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)+)\s+(.*)$").expect("identifier regex")
});

/// Phase identifiers are exactly `N.0`.
static PHASE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.0$").expect("phase id regex"));

/// Lookup failures when a scope names a phase or task the list does not contain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskLookupError {
    #[error("phase '{requested}' not found in the task list (available: {})", .available.join(", "))]
    PhaseNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("task '{requested}' not found in the task list (available: {})", .available.join(", "))]
    TaskNotFound {
        requested: String,
        available: Vec<String>,
    },
}

/// Whether subtask lines currently have a phase to attach to.
///
/// The carried state (the phase being filled) is always `phases.last_mut()`
/// when in [`State::InPhase`]; tracking the state separately keeps the
/// attachment rule explicit instead of relying on `last_mut()` being
/// accidentally `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NoPhase,
    InPhase,
}

/// Line-by-line task-list parser.
struct Parser {
    state: State,
    /// Indent width of the first phase line; defines top level for the document.
    top_indent: Option<usize>,
    phases: Vec<Phase>,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::NoPhase,
            top_indent: None,
            phases: Vec::new(),
        }
    }

    /// Consume one line, updating parser state.
    fn feed_line(&mut self, line: &str) {
        let Some(caps) = CHECKBOX_RE.captures(line) else {
            return;
        };
        let indent = caps[1].len();
        let checked = !caps[2].is_empty();
        let Some(id_caps) = IDENTIFIER_RE.captures(caps.get(3).map_or("", |m| m.as_str())) else {
            // Checkbox without a parseable numeric identifier: ignored.
            return;
        };
        let id = id_caps[1].to_string();
        let description = id_caps[2].trim_end().to_string();

        if self.is_phase_line(&id, indent) {
            self.top_indent = Some(self.top_indent.map_or(indent, |t| t.min(indent)));
            self.phases.push(Phase {
                number: id,
                description,
                checked,
                subtasks: Vec::new(),
            });
            self.state = State::InPhase;
            return;
        }

        match self.state {
            // Subtask lines before the first phase have nothing to attach to.
            State::NoPhase => {}
            State::InPhase => {
                if let Some(phase) = self.phases.last_mut() {
                    phase.subtasks.push(Subtask {
                        id,
                        description,
                        completed: checked,
                    });
                }
            }
        }
    }

    /// A line opens a phase when its identifier is `N.0` and it sits at
    /// the document's top-level indent. Deeper `N.0` lines are subtasks
    /// of whatever phase encloses them.
    fn is_phase_line(&self, id: &str, indent: usize) -> bool {
        PHASE_ID_RE.is_match(id) && self.top_indent.is_none_or(|t| indent <= t)
    }

    fn finish(self) -> TaskList {
        TaskList {
            phases: self.phases,
        }
    }
}

/// Parse raw task-list text into phases in document order.
///
/// Malformed lines are skipped, never errors; an input without any
/// recognizable phase lines yields an empty list.
pub fn parse_task_list(text: &str) -> TaskList {
    let mut parser = Parser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Pick the "current" phase for review.
///
/// Precedence: the last completed phase in document order; when nothing
/// is completed, the first phase. An empty list yields an empty
/// selection with `total_phases == 0`.
pub fn select_current_phase(tasks: &TaskList) -> PhaseSelection {
    if tasks.phases.is_empty() {
        return PhaseSelection::default();
    }
    let anchor = tasks
        .phases
        .iter()
        .rposition(|p| p.completed())
        .unwrap_or(0);
    selection_at(tasks, anchor)
}

/// Resolve a validated scope against the parsed list.
///
/// `recent_phase` applies the selection precedence; the other scopes
/// anchor explicitly and may fail when the named phase/task is absent.
pub fn resolve_scope(
    tasks: &TaskList,
    scope: &ResolvedScope,
) -> Result<PhaseSelection, TaskLookupError> {
    match scope {
        ResolvedScope::RecentPhase => Ok(select_current_phase(tasks)),
        ResolvedScope::FullProject => {
            if tasks.phases.is_empty() {
                return Ok(PhaseSelection::default());
            }
            let mut selection = selection_at(tasks, tasks.phases.len() - 1);
            selection.subtasks_completed = tasks
                .phases
                .iter()
                .flat_map(|p| p.subtasks_completed())
                .collect();
            Ok(selection)
        }
        ResolvedScope::SpecificPhase(number) => {
            let anchor = tasks
                .phases
                .iter()
                .position(|p| p.number == *number)
                .ok_or_else(|| TaskLookupError::PhaseNotFound {
                    requested: number.clone(),
                    available: tasks.phases.iter().map(|p| p.number.clone()).collect(),
                })?;
            Ok(selection_at(tasks, anchor))
        }
        ResolvedScope::SpecificTask(task_id) => {
            let anchor = tasks
                .phases
                .iter()
                .position(|p| p.subtasks.iter().any(|s| s.id == *task_id))
                .ok_or_else(|| TaskLookupError::TaskNotFound {
                    requested: task_id.clone(),
                    available: tasks
                        .phases
                        .iter()
                        .flat_map(|p| p.subtasks.iter().map(|s| s.id.clone()))
                        .collect(),
                })?;
            let mut selection = selection_at(tasks, anchor);
            selection.subtasks_completed = tasks.phases[anchor]
                .subtasks
                .iter()
                .filter(|s| s.completed && s.id == *task_id)
                .map(Subtask::label)
                .collect();
            Ok(selection)
        }
    }
}

/// Build the selection anchored at `phases[anchor]`.
fn selection_at(tasks: &TaskList, anchor: usize) -> PhaseSelection {
    let phase = &tasks.phases[anchor];
    let previous_phase_completed = anchor
        .checked_sub(1)
        .map(|i| tasks.phases[i].label())
        .unwrap_or_default();
    let next_phase = tasks
        .phases
        .get(anchor + 1)
        .map(Phase::label)
        .unwrap_or_default();

    PhaseSelection {
        total_phases: tasks.total_phases(),
        current_phase_number: phase.number.clone(),
        current_phase_description: phase.description.clone(),
        subtasks_completed: phase.subtasks_completed(),
        previous_phase_completed,
        next_phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THREE_PHASES: &str = "\
- [x] 1.0 Phase One
  - [x] 1.1 Subtask one
  - [x] 1.2 Subtask two
- [x] 2.0 Phase Two
  - [x] 2.1 Subtask one
  - [x] 2.2 Subtask two
  - [x] 2.3 Subtask three
- [ ] 3.0 Phase Three
  - [ ] 3.1 Subtask one
";

    #[test]
    fn parses_phases_and_selects_last_completed() {
        let tasks = parse_task_list(THREE_PHASES);
        assert_eq!(tasks.total_phases(), 3);

        let selection = select_current_phase(&tasks);
        assert_eq!(selection.total_phases, 3);
        assert_eq!(selection.current_phase_number, "2.0");
        assert_eq!(selection.current_phase_description, "Phase Two");
        assert_eq!(selection.previous_phase_completed, "1.0 Phase One");
        assert_eq!(selection.next_phase, "3.0 Phase Three");
        assert_eq!(selection.subtasks_completed.len(), 3);
        assert!(
            selection
                .subtasks_completed
                .iter()
                .all(|t| t.contains("2."))
        );
    }

    #[test]
    fn all_phases_complete_selects_last() {
        let content = "\
- [x] 1.0 Phase One
  - [x] 1.1 Subtask one
- [x] 2.0 Phase Two
  - [x] 2.1 Subtask one
  - [x] 2.2 Subtask two
";
        let tasks = parse_task_list(content);
        let selection = select_current_phase(&tasks);
        assert_eq!(tasks.total_phases(), 2);
        assert_eq!(selection.current_phase_number, "2.0");
        assert_eq!(selection.current_phase_description, "Phase Two");
        assert_eq!(selection.subtasks_completed.len(), 2);
        assert_eq!(selection.next_phase, "");
    }

    #[test]
    fn no_completed_phase_falls_back_to_first() {
        let content = "\
- [ ] 1.0 Phase One
  - [x] 1.1 Subtask one
- [ ] 2.0 Phase Two
  - [ ] 2.1 Subtask one
";
        let tasks = parse_task_list(content);
        let selection = select_current_phase(&tasks);
        assert_eq!(selection.current_phase_number, "1.0");
        assert_eq!(selection.previous_phase_completed, "");
    }

    #[test]
    fn nested_sub_subtasks_attach_to_enclosing_phase() {
        let content = "\
- [ ] 1.0 Phase One
  - [x] 1.1 Subtask one
    - [x] 1.1.1 Sub-subtask
  - [ ] 1.2 Subtask two
";
        let tasks = parse_task_list(content);
        assert_eq!(tasks.total_phases(), 1);
        // 1.1, 1.1.1, and 1.2 all count as subtasks of phase 1.0
        assert_eq!(tasks.phases[0].subtasks.len(), 3);

        let selection = select_current_phase(&tasks);
        assert_eq!(selection.current_phase_number, "1.0");
        assert_eq!(selection.subtasks_completed.len(), 2);
        assert!(selection.subtasks_completed[0].contains("1.1"));
    }

    #[test]
    fn completed_requires_own_checkbox_and_subtasks() {
        let content = "\
- [ ] 1.0 Unchecked phase
  - [x] 1.1 Done
- [x] 2.0 Checked but open subtask
  - [ ] 2.1 Not done
";
        let tasks = parse_task_list(content);
        assert!(!tasks.phases[0].completed());
        assert!(!tasks.phases[1].completed());
    }

    #[test]
    fn phase_without_subtasks_completed_by_own_checkbox() {
        let tasks = parse_task_list("- [x] 1.0 Solo phase\n- [ ] 2.0 Open phase\n");
        assert!(tasks.phases[0].completed());
        assert!(!tasks.phases[1].completed());

        let selection = select_current_phase(&tasks);
        assert_eq!(selection.current_phase_number, "1.0");
        assert_eq!(selection.subtasks_completed, Vec::<String>::new());
    }

    #[test]
    fn malformed_checkbox_lines_are_ignored() {
        let content = "\
- [x] not a numbered item
- [x] 1.0 Phase One
- [ ] also unnumbered
  - [x] 1.1 Subtask
some prose line
";
        let tasks = parse_task_list(content);
        assert_eq!(tasks.total_phases(), 1);
        assert_eq!(tasks.phases[0].subtasks.len(), 1);
    }

    #[test]
    fn subtasks_before_any_phase_are_dropped() {
        let content = "\
  - [x] 0.1 Orphan subtask
- [x] 1.0 Phase One
";
        let tasks = parse_task_list(content);
        assert_eq!(tasks.total_phases(), 1);
        assert!(tasks.phases[0].subtasks.is_empty());
    }

    #[test]
    fn uppercase_mark_and_loose_spacing_accepted() {
        let content = "\
- [X] 1.0 Phase One
  -  [x]  1.1 Subtask one
- [ ] 2.0 Phase Two
";
        let tasks = parse_task_list(content);
        assert_eq!(tasks.total_phases(), 2);
        assert!(tasks.phases[0].checked);
        assert!(tasks.phases[0].subtasks[0].completed);
    }

    #[test]
    fn indented_phase_id_is_a_subtask() {
        // `2.0` nested under 1.0 attaches as a subtask, not a new phase
        let content = "\
- [ ] 1.0 Phase One
  - [x] 2.0 Looks like a phase
";
        let tasks = parse_task_list(content);
        assert_eq!(tasks.total_phases(), 1);
        assert_eq!(tasks.phases[0].subtasks[0].id, "2.0");
    }

    #[test]
    fn empty_input_yields_empty_selection() {
        let tasks = parse_task_list("");
        assert_eq!(tasks.total_phases(), 0);
        let selection = select_current_phase(&tasks);
        assert_eq!(selection, PhaseSelection::default());
        assert_eq!(selection.total_phases, 0);
    }

    #[test]
    fn identifiers_need_not_be_contiguous() {
        let tasks = parse_task_list("- [x] 1.0 First\n- [ ] 4.0 Jumped ahead\n");
        assert_eq!(tasks.total_phases(), 2);
        assert_eq!(tasks.phases[1].number, "4.0");
    }

    // ── scope resolution ────────────────────────────────────────────

    #[test]
    fn full_project_aggregates_completed_subtasks() {
        let tasks = parse_task_list(THREE_PHASES);
        let selection = resolve_scope(&tasks, &ResolvedScope::FullProject).unwrap();
        assert_eq!(selection.current_phase_number, "3.0");
        assert_eq!(selection.next_phase, "");
        // 2 from phase 1.0 + 3 from phase 2.0, none from 3.0
        assert_eq!(selection.subtasks_completed.len(), 5);
        assert!(selection.subtasks_completed[0].contains("1.1"));
        assert!(selection.subtasks_completed[4].contains("2.3"));
    }

    #[test]
    fn specific_phase_selects_by_number() {
        let tasks = parse_task_list(THREE_PHASES);
        let selection =
            resolve_scope(&tasks, &ResolvedScope::SpecificPhase("1.0".to_string())).unwrap();
        assert_eq!(selection.current_phase_number, "1.0");
        assert_eq!(selection.previous_phase_completed, "");
        assert_eq!(selection.next_phase, "2.0 Phase Two");
        assert_eq!(selection.subtasks_completed.len(), 2);
    }

    #[test]
    fn specific_phase_missing_lists_available() {
        let tasks = parse_task_list(THREE_PHASES);
        let err =
            resolve_scope(&tasks, &ResolvedScope::SpecificPhase("9.0".to_string())).unwrap_err();
        assert!(matches!(err, TaskLookupError::PhaseNotFound { .. }));
        let msg = err.to_string();
        assert!(msg.contains("'9.0'"));
        assert!(msg.contains("1.0, 2.0, 3.0"));
    }

    #[test]
    fn specific_task_narrows_to_the_named_task() {
        let tasks = parse_task_list(THREE_PHASES);
        let selection =
            resolve_scope(&tasks, &ResolvedScope::SpecificTask("2.2".to_string())).unwrap();
        assert_eq!(selection.current_phase_number, "2.0");
        assert_eq!(selection.subtasks_completed, vec!["2.2 Subtask two"]);
    }

    #[test]
    fn specific_task_incomplete_yields_empty_completed_list() {
        let tasks = parse_task_list(THREE_PHASES);
        let selection =
            resolve_scope(&tasks, &ResolvedScope::SpecificTask("3.1".to_string())).unwrap();
        assert_eq!(selection.current_phase_number, "3.0");
        assert!(selection.subtasks_completed.is_empty());
    }

    #[test]
    fn specific_task_missing_lists_available() {
        let tasks = parse_task_list(THREE_PHASES);
        let err =
            resolve_scope(&tasks, &ResolvedScope::SpecificTask("7.7".to_string())).unwrap_err();
        assert!(matches!(err, TaskLookupError::TaskNotFound { .. }));
        assert!(err.to_string().contains("1.1"));
    }

    #[test]
    fn recent_phase_scope_matches_selector() {
        let tasks = parse_task_list(THREE_PHASES);
        assert_eq!(
            resolve_scope(&tasks, &ResolvedScope::RecentPhase).unwrap(),
            select_current_phase(&tasks)
        );
    }
}
