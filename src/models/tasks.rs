//! Task-list data types: phases, subtasks, and the phase selection
//! consumed by the template assembler.

/// A single checkbox item nested under a phase.
///
/// Identifiers have two or more dot-separated numeric components
/// (`1.1`, `1.1.1`). Sub-subtasks are attributed to the enclosing
/// phase's flat subtask list; no deeper hierarchy is modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub description: String,
    pub completed: bool,
}

impl Subtask {
    /// Render as `"<id> <description>"`, the form used in completed lists.
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.description)
    }
}

/// A top-level `N.0` unit of work with its subtasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub number: String,
    pub description: String,
    /// Whether the phase's own checkbox was marked.
    pub checked: bool,
    pub subtasks: Vec<Subtask>,
}

impl Phase {
    /// A phase is completed when its own checkbox is marked and every
    /// direct subtask is completed. A phase with no subtasks is
    /// completed iff its own checkbox is marked.
    pub fn completed(&self) -> bool {
        self.checked && self.subtasks.iter().all(|s| s.completed)
    }

    /// Identifiers of the marked subtasks, each as `"<id> <description>"`.
    pub fn subtasks_completed(&self) -> Vec<String> {
        self.subtasks
            .iter()
            .filter(|s| s.completed)
            .map(Subtask::label)
            .collect()
    }

    /// Render as `"<number> <description>"`, the form used for
    /// previous/next phase references.
    pub fn label(&self) -> String {
        format!("{} {}", self.number, self.description)
    }
}

/// The parsed task list: phases in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub phases: Vec<Phase>,
}

impl TaskList {
    /// Count of top-level phase markers, regardless of completion state.
    pub fn total_phases(&self) -> usize {
        self.phases.len()
    }
}

/// The phase-selection result fed into the template assembler.
///
/// All string fields are empty when the task list had no phases; the
/// document still renders with empty paired tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseSelection {
    pub total_phases: usize,
    pub current_phase_number: String,
    pub current_phase_description: String,
    /// Marked direct subtasks of the selected phase, `"<id> <description>"` each.
    pub subtasks_completed: Vec<String>,
    /// The phase immediately preceding the selection, `"<number> <description>"`,
    /// or empty when the selection is first.
    pub previous_phase_completed: String,
    /// The phase immediately following, same rendering, or empty when last.
    pub next_phase: String,
}
