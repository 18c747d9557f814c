//! Turns a task snapshot into something a display can show.
//!
//! [`build_list`] and [`pending_count`] are pure. [`render`] and
//! [`render_pending_count`] push their results into whatever display targets
//! the host provides, and quietly do nothing when a target is missing.

use crate::task::{Task, TaskId};

/// Text shown in place of the list when there are no tasks.
pub const EMPTY_PLACEHOLDER: &str = "No tasks found";

/// A user intent that the coordinator knows how to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Toggle(TaskId),
    Remove(TaskId),
}

/// One displayable task entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl TaskRow {
    /// What the completion checkbox triggers.
    pub fn toggle_action(&self) -> Action {
        Action::Toggle(self.id)
    }

    /// What the remove button triggers.
    pub fn remove_action(&self) -> Action {
        Action::Remove(self.id)
    }

    pub fn is_struck_through(&self) -> bool {
        self.completed
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_string(),
            completed: task.is_completed(),
        }
    }
}

/// The full content of the task list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { placeholder: &'static str },
    Rows(Vec<TaskRow>),
}

impl ListView {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Rows(rows) => rows,
        }
    }
}

/// Display that shows the task list.
#[cfg_attr(test, mockall::automock)]
pub trait ListTarget {
    /// Drops whatever is shown and shows `view` instead.
    fn replace(&mut self, view: &ListView);
}

/// Display that shows the pending-task badge.
#[cfg_attr(test, mockall::automock)]
pub trait CounterTarget {
    fn set_count(&mut self, pending: usize);
}

/// Rows ordered by creation time. Tasks created at the same instant keep
/// their storage order.
pub fn build_list(tasks: &[Task]) -> ListView {
    if tasks.is_empty() {
        return ListView::Empty {
            placeholder: EMPTY_PLACEHOLDER,
        };
    }
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.created_at());
    ListView::Rows(ordered.into_iter().map(TaskRow::from).collect())
}

pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.is_completed()).count()
}

pub fn render(tasks: &[Task], target: Option<&mut dyn ListTarget>) {
    if let Some(target) = target {
        target.replace(&build_list(tasks));
    }
}

pub fn render_pending_count(tasks: &[Task], target: Option<&mut dyn CounterTarget>) {
    if let Some(target) = target {
        target.set_count(pending_count(tasks));
    }
}
