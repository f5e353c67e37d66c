//! Read-only projections over the task collection.
//!
//! Everything here is a pure function of its arguments, so callers may cache
//! results for as long as the collection is unchanged.

use crate::error::AppError;
use crate::model::{Task, YearMonth};
use time::{Date, OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarkers {
    pub date: Date,
    pub has_pending: bool,
    pub has_completed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCounts {
    pub total: usize,
    pub completed: usize,
}

impl DateCounts {
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounts {
    pub for_date: DateCounts,
    pub total_all: usize,
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

/// The caller's local calendar date.
pub fn today_local() -> Date {
    now_local().date()
}

/// Incomplete before completed, then high before medium before low.
/// Ties keep their collection order.
pub fn sort_canonical(tasks: &mut [&Task]) {
    tasks.sort_by_key(|task| (task.completed, task.priority.rank()));
}

pub fn tasks_for_date(tasks: &[Task], date: Date) -> Vec<&Task> {
    let mut matching: Vec<&Task> = tasks.iter().filter(|task| task.due_date == date).collect();
    sort_canonical(&mut matching);
    matching
}

pub fn tasks_for_today(tasks: &[Task]) -> Vec<&Task> {
    tasks_for_date(tasks, today_local())
}

pub fn month_grid(tasks: &[Task], month: YearMonth) -> Result<Vec<DayMarkers>, AppError> {
    let days = month.days()?;
    Ok(days
        .into_iter()
        .map(|date| {
            let mut markers = DayMarkers {
                date,
                has_pending: false,
                has_completed: false,
            };
            for task in tasks.iter().filter(|task| task.due_date == date) {
                if task.completed {
                    markers.has_completed = true;
                } else {
                    markers.has_pending = true;
                }
            }
            markers
        })
        .collect())
}

pub fn aggregate_counts(tasks: &[Task], date: Date) -> AggregateCounts {
    let for_date = tasks
        .iter()
        .filter(|task| task.due_date == date)
        .fold(DateCounts::default(), |mut counts, task| {
            counts.total += 1;
            if task.completed {
                counts.completed += 1;
            }
            counts
        });

    AggregateCounts {
        for_date,
        total_all: tasks.len(),
    }
}

pub fn greeting(hour: u8) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        _ => "Good Evening",
    }
}
