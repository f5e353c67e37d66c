//! The owned task collection and its mutation operations.
//!
//! Every mutation is applied to a copy of the collection, written to the
//! storage slot, and only then swapped in, so memory never runs ahead of
//! what has been persisted.

use crate::error::AppError;
use crate::model::{Task, TaskDraft};
use crate::notify::{Notice, Notifier};
use crate::storage::TaskStorage;
use uuid::Uuid;

/// Result of a toggle: the task after the flip and the flag it had before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub task: Task,
    pub was_completed: bool,
}

pub struct TaskStore<S: TaskStorage> {
    storage: S,
    notifier: Box<dyn Notifier>,
    tasks: Vec<Task>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Reads the slot once. A missing slot starts an empty collection; a
    /// malformed one fails and is left as it is.
    pub fn open(storage: S, notifier: Box<dyn Notifier>) -> Result<Self, AppError> {
        let tasks = storage.load()?.unwrap_or_default();
        log::debug!("task store opened with {} tasks", tasks.len());
        Ok(Self {
            storage,
            notifier,
            tasks,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        let trimmed_id = id.trim();
        self.tasks.iter().find(|task| task.id == trimmed_id)
    }

    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        let id = self.next_id();
        let task = Task::from_draft(id, draft)?;

        let mut tasks = self.tasks.clone();
        tasks.push(task.clone());
        self.commit(tasks)?;

        log::info!("added task {} due {}", task.id, task.due_date);
        self.announce(Notice::task_created(&task));
        Ok(task)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Toggle, AppError> {
        let index = self.position(id)?;

        let mut tasks = self.tasks.clone();
        let was_completed = tasks[index].completed;
        tasks[index].completed = !was_completed;
        let task = tasks[index].clone();
        self.commit(tasks)?;

        log::info!("task {} completed={}", task.id, task.completed);
        self.announce(Notice::task_toggled(was_completed));
        Ok(Toggle {
            task,
            was_completed,
        })
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;

        let mut tasks = self.tasks.clone();
        let removed = tasks.remove(index);
        self.commit(tasks)?;

        log::info!("deleted task {}", removed.id);
        self.announce(Notice::task_deleted(&removed));
        Ok(removed)
    }

    /// Editing is not available yet: the collection is never touched and the
    /// caller is told so through the notifier.
    pub fn edit(&mut self, id: &str) -> Result<(), AppError> {
        self.position(id)?;
        self.announce(Notice::edit_unavailable());
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, AppError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        self.tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found(format!("task not found: {trimmed_id}")))
    }

    fn next_id(&self) -> String {
        loop {
            let id = format!("task-{}", Uuid::new_v4().simple());
            if !self.tasks.iter().any(|task| task.id == id) {
                return id;
            }
        }
    }

    fn commit(&mut self, tasks: Vec<Task>) -> Result<(), AppError> {
        self.storage.save(&tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    fn announce(&self, notice: Notice) {
        if let Err(err) = self.notifier.notify(&notice) {
            log::warn!("notification failed: {err}");
        }
    }
}
