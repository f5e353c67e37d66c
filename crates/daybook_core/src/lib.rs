//! Task collection manager behind the daybook dashboard and calendar.

pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod storage;
pub mod store;
pub mod view;

pub use error::AppError;
pub use model::{Priority, Task, TaskDraft, YearMonth};
pub use store::{TaskStore, Toggle};
