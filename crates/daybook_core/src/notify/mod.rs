use crate::error::AppError;
use crate::model::{Task, short_date_label};
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsNotifier;

pub const APP_NAME: &str = "daybook";

/// A human-readable confirmation shown after a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new<T: Into<String>, B: Into<String>>(title: T, body: B) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn task_created(task: &Task) -> Self {
        Self::new(
            "Task Created! ✨",
            format!(
                "\"{}\" has been added for {}.",
                task.title,
                short_date_label(task.due_date)
            ),
        )
    }

    /// Wording follows the state the task was in before the toggle.
    pub fn task_toggled(was_completed: bool) -> Self {
        if was_completed {
            Self::new("Task Reopened 🔄", "Task marked as incomplete")
        } else {
            Self::new("Task Completed! 🎉", "Great job! Keep it up! 💪")
        }
    }

    pub fn task_deleted(task: &Task) -> Self {
        Self::new(
            "Task Deleted 🗑️",
            format!("\"{}\" has been removed.", task.title),
        )
    }

    pub fn edit_unavailable() -> Self {
        Self::new(
            "Edit Feature Coming Soon! 🚧",
            "Task editing will be available in the next update.",
        )
    }
}

pub trait Notifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: &Notice) -> Result<(), AppError> {
        Ok(())
    }
}

/// Keeps every notice it receives; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        self.notices.borrow_mut().push(notice.clone());
        Ok(())
    }
}

#[cfg(target_os = "linux")]
pub fn desktop_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Ok(Box::new(LinuxNotifier))
}

#[cfg(windows)]
pub fn desktop_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Ok(Box::new(WindowsNotifier))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn desktop_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Err(AppError::invalid_data(
        "desktop notifications are not supported on this platform",
    ))
}
