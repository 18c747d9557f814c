use crate::clock::{Clock, SystemClock};
use crate::store::{KeyValueStore, StoreError, TaskStorage};
use crate::task::{Task, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("task text must not be empty")]
    EmptyText,
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("no task id left above {0}")]
    IdsExhausted(TaskId),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// CRUD over the persisted task collection.
///
/// Every operation loads the whole collection, changes it and writes it back.
pub struct TaskRepository<S, C = SystemClock> {
    storage: TaskStorage<S>,
    clock: C,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(storage: TaskStorage<S>) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskRepository<S, C> {
    pub fn with_clock(storage: TaskStorage<S>, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &TaskStorage<S> {
        &self.storage
    }

    /// Creates a pending task from `text`.
    ///
    /// # Returns
    ///
    /// The stored task, [`TaskError::EmptyText`] for blank input (nothing is
    /// written), [`TaskError::IdsExhausted`] when a stored id already sits at
    /// `i64::MAX`, or [`TaskError::Storage`] if the collection could not be saved.
    #[tracing::instrument(skip(self))]
    pub fn create(&self, text: &str) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let mut tasks = self.storage.load();
        let id = next_id(&tasks, now)?;
        let task = Task::new(id, text, now).ok_or(TaskError::EmptyText)?;
        tasks.push(task.clone());
        self.storage.save(&tasks)?;
        debug!(id, "created task");
        Ok(task)
    }

    /// Returns the persisted collection in storage order.
    pub fn list(&self) -> Vec<Task> {
        self.storage.load()
    }

    /// Merges `patch` over the task with `id` and persists the collection.
    ///
    /// An unknown id is [`TaskError::NotFound`] and nothing is written.
    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskError> {
        let patch = patch.validated().ok_or(TaskError::EmptyText)?;
        let mut tasks = self.storage.load();
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskError::NotFound(id))?;
        task.apply(patch);
        let updated = task.clone();
        self.storage.save(&tasks)?;
        debug!(id, completed = updated.is_completed(), "updated task");
        Ok(updated)
    }

    /// Removes the task with `id`. Removing an unknown id still succeeds.
    #[tracing::instrument(skip(self))]
    pub fn remove(&self, id: TaskId) -> Result<(), TaskError> {
        let mut tasks = self.storage.load();
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        self.storage.save(&tasks)?;
        debug!(id, removed = before - tasks.len(), "removed task");
        Ok(())
    }

    /// Flips the completion flag of `id`. Returns `Ok(None)` for an unknown id.
    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let Some(completed) = self
            .list()
            .iter()
            .find(|task| task.id() == id)
            .map(Task::is_completed)
        else {
            debug!(id, "toggle ignored, no such task");
            return Ok(None);
        };
        self.update(id, TaskPatch::completed(!completed)).map(Some)
    }
}

/// Ids are the creation instant in milliseconds, bumped past the largest
/// existing id so two tasks created within one millisecond stay distinct.
fn next_id(tasks: &[Task], now: DateTime<Utc>) -> Result<TaskId, TaskError> {
    let from_clock = now.timestamp_millis();
    match tasks.iter().map(Task::id).max() {
        Some(max) if max >= from_clock => {
            max.checked_add(1).ok_or(TaskError::IdsExhausted(max))
        }
        _ => Ok(from_clock),
    }
}
