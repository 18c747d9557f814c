use crate::clock::Clock;
use crate::render::{self, Action, CounterTarget, ListTarget};
use crate::repository::{TaskError, TaskRepository};
use crate::store::KeyValueStore;
use crate::task::{Task, TaskId};
use tracing::{info, warn};

/// Shown when the user submits an empty task.
pub const EMPTY_INPUT_ALERT: &str = "Please enter a task.";

/// The host surface the coordinator draws on.
///
/// Either display target may be missing; rendering into a missing target is
/// skipped.
pub trait Page {
    fn task_list(&mut self) -> Option<&mut dyn ListTarget>;
    fn pending_counter(&mut self) -> Option<&mut dyn CounterTarget>;
    /// Empties the text input after a task was added.
    fn clear_input(&mut self);
    fn alert(&mut self, _message: &str) {}
}

/// Entry points for user actions. Each one goes through the repository and
/// then redraws the page from a fresh snapshot.
pub struct Coordinator<S, C, P> {
    repository: TaskRepository<S, C>,
    page: P,
}

impl<S: KeyValueStore, C: Clock, P: Page> Coordinator<S, C, P> {
    pub fn new(repository: TaskRepository<S, C>, page: P) -> Self {
        Self { repository, page }
    }

    pub fn repository(&self) -> &TaskRepository<S, C> {
        &self.repository
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    /// Initial draw once the page is up.
    pub fn on_load(&mut self) -> usize {
        self.refresh()
    }

    /// Adds a task. On failure the page is left exactly as it was.
    pub fn on_add(&mut self, input: &str) -> Result<Task, TaskError> {
        match self.repository.create(input) {
            Ok(task) => {
                info!(id = task.id(), "task added");
                self.page.clear_input();
                self.refresh();
                Ok(task)
            }
            Err(TaskError::EmptyText) => {
                self.page.alert(EMPTY_INPUT_ALERT);
                Err(TaskError::EmptyText)
            }
            Err(err) => {
                warn!(%err, "task not added");
                Err(err)
            }
        }
    }

    pub fn on_toggle(&mut self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let result = self.repository.toggle_complete(id);
        if let Err(err) = &result {
            warn!(id, %err, "task not toggled");
        }
        self.refresh();
        result
    }

    pub fn on_remove(&mut self, id: TaskId) -> Result<(), TaskError> {
        let result = self.repository.remove(id);
        if let Err(err) = &result {
            warn!(id, %err, "task not removed");
        }
        self.refresh();
        result
    }

    /// Routes an action coming from the page.
    pub fn dispatch(&mut self, action: Action) -> Result<(), TaskError> {
        match action {
            Action::Add(text) => self.on_add(&text).map(|_| ()),
            Action::Toggle(id) => self.on_toggle(id).map(|_| ()),
            Action::Remove(id) => self.on_remove(id),
        }
    }

    /// Redraws the list and the counter from one load of the collection.
    ///
    /// Returns the pending count that was drawn.
    pub fn refresh(&mut self) -> usize {
        let tasks = self.repository.list();
        render::render(&tasks, self.page.task_list());
        render::render_pending_count(&tasks, self.page.pending_counter());
        render::pending_count(&tasks)
    }
}
