use crate::error::AppError;
use crate::model::Task;
use std::cell::RefCell;

pub mod json_store;

pub use json_store::JsonFileStore;

/// The durable slot holding the whole task collection.
///
/// Reads and writes always cover the entire collection; there is no partial
/// or append protocol.
pub trait TaskStorage {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Task>>, AppError>;

    fn save(&self, tasks: &[Task]) -> Result<(), AppError>;
}

/// In-process slot that keeps the serialized document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    fail_writes: RefCell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content<C: Into<String>>(content: C) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            fail_writes: RefCell::new(false),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Makes every later `save` fail with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl TaskStorage for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Task>>, AppError> {
        match self.content.borrow().as_deref() {
            Some(content) => json_store::decode(content).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        if *self.fail_writes.borrow() {
            return Err(AppError::io("storage is unavailable"));
        }
        let content = json_store::encode(tasks)?;
        *self.content.borrow_mut() = Some(content);
        Ok(())
    }
}

impl<S: TaskStorage + ?Sized> TaskStorage for &S {
    fn load(&self) -> Result<Option<Vec<Task>>, AppError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        (**self).save(tasks)
    }
}
