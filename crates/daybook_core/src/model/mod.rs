mod date;
mod task;

pub use date::{YearMonth, due_date_format, format_date, parse_date, short_date_label};
pub use task::{
    DEFAULT_EMOJI, EMOJI_CHOICES, Priority, SUGGESTED_CATEGORIES, Task, TaskDraft,
};
