use daybook_core::error::AppError;
use daybook_core::model::{Task, YearMonth, format_date};
use daybook_core::view::{AggregateCounts, DayMarkers};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::Date;
use time::macros::format_description;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "")]
    status: &'static str,
    #[tabled(rename = "task")]
    title: String,
    #[tabled(rename = "priority")]
    priority: &'static str,
    #[tabled(rename = "category")]
    category: String,
    #[tabled(rename = "due")]
    due: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        let title = match task.emoji.as_deref() {
            Some(emoji) => format!("{emoji} {}", task.title),
            None => task.title.clone(),
        };
        Self {
            id: task.id.clone(),
            status: if task.completed { "✓" } else { "○" },
            title,
            priority: task.priority.as_str(),
            category: task.category.clone().unwrap_or_else(|| "-".to_string()),
            due: format_date(task.due_date),
        }
    }
}

pub fn long_date(date: Date) -> String {
    date.format(format_description!(
        "[weekday], [month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| format_date(date))
}

pub fn task_table(tasks: &[&Task]) -> String {
    let rows: Vec<TaskRow> = tasks.iter().map(|task| TaskRow::from_task(task)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn task_json(task: &Task) -> Result<Value, AppError> {
    serde_json::to_value(task).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn tasks_json(tasks: &[&Task]) -> Result<Value, AppError> {
    let payload = tasks
        .iter()
        .map(|task| task_json(task))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(payload))
}

pub fn day_listing(date: Date, tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return format!("No tasks for {}", long_date(date));
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    format!(
        "{} ({}/{} completed)\n{}",
        long_date(date),
        completed,
        tasks.len(),
        task_table(tasks)
    )
}

pub fn dashboard(
    greeting: &str,
    today: Date,
    counts: &AggregateCounts,
    tasks: &[&Task],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{greeting}! 👋\n{}\n\n", long_date(today)));
    out.push_str(&format!(
        "Completed today: {}/{}  |  Pending: {}  |  Total tasks: {}\n\n",
        counts.for_date.completed,
        counts.for_date.total,
        counts.for_date.pending(),
        counts.total_all
    ));

    if tasks.is_empty() {
        out.push_str("🌸 No tasks for today\nEnjoy your free time or add a new task to get started!");
        return out;
    }

    out.push_str(&task_table(tasks));
    let completed = counts.for_date.completed;
    if completed > 0 {
        let plural = if completed > 1 { "s" } else { "" };
        out.push_str(&format!(
            "\n🎉 You've completed {completed} task{plural} today. Keep up the great work!"
        ));
    }
    out
}

pub fn dashboard_json(
    greeting: &str,
    today: Date,
    counts: &AggregateCounts,
    tasks: &[&Task],
) -> Result<Value, AppError> {
    Ok(serde_json::json!({
        "greeting": greeting,
        "date": format_date(today),
        "stats": stats_json(today, counts),
        "tasks": tasks_json(tasks)?,
    }))
}

pub fn stats_json(date: Date, counts: &AggregateCounts) -> Value {
    serde_json::json!({
        "date": format_date(date),
        "total_for_date": counts.for_date.total,
        "completed_for_date": counts.for_date.completed,
        "pending_for_date": counts.for_date.pending(),
        "total_all": counts.total_all,
    })
}

pub fn stats(date: Date, counts: &AggregateCounts) -> String {
    format!(
        "{}\ncompleted: {}/{}\npending: {}\ntotal tasks: {}",
        long_date(date),
        counts.for_date.completed,
        counts.for_date.total,
        counts.for_date.pending(),
        counts.total_all
    )
}

fn day_cell(day: &DayMarkers, today: Date) -> String {
    let mut cell = if day.date == today {
        format!("[{}]", day.date.day())
    } else {
        day.date.day().to_string()
    };
    if day.has_pending {
        cell.push('•');
    }
    if day.has_completed {
        cell.push('✓');
    }
    cell
}

/// Renders a Sunday-first calendar grid.
pub fn month_calendar(month: YearMonth, grid: &[DayMarkers], today: Date) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from));

    let lead = grid
        .first()
        .map(|day| usize::from(day.date.weekday().number_days_from_sunday()))
        .unwrap_or(0);
    let mut week: Vec<String> = vec![String::new(); lead];
    for day in grid {
        week.push(day_cell(day, today));
        if week.len() == 7 {
            builder.push_record(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        week.resize(7, String::new());
        builder.push_record(week);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!(
        "{}\n{}\n• pending  ✓ completed  [ ] today",
        month.label(),
        table
    )
}

pub fn month_json(month: YearMonth, grid: &[DayMarkers]) -> Value {
    let days: Vec<Value> = grid
        .iter()
        .map(|day| {
            serde_json::json!({
                "date": format_date(day.date),
                "has_pending": day.has_pending,
                "has_completed": day.has_completed,
            })
        })
        .collect();
    serde_json::json!({
        "month": month.to_string(),
        "previous": month.previous().to_string(),
        "next": month.next().to_string(),
        "days": days,
    })
}

#[cfg(test)]
mod tests {
    use super::{dashboard, day_listing, long_date, month_calendar, month_json};
    use daybook_core::model::{Priority, Task, YearMonth};
    use daybook_core::view::{self, AggregateCounts, DateCounts};
    use time::Month;
    use time::macros::date;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("title {id}"),
            description: None,
            completed,
            priority: Priority::High,
            due_date: date!(2024 - 03 - 15),
            category: Some("Work".to_string()),
            emoji: Some("🌸".to_string()),
        }
    }

    #[test]
    fn long_date_spells_out_weekday_and_month() {
        assert_eq!(long_date(date!(2024 - 03 - 15)), "Friday, March 15, 2024");
    }

    #[test]
    fn day_listing_reports_empty_days() {
        assert_eq!(
            day_listing(date!(2024 - 03 - 15), &[]),
            "No tasks for Friday, March 15, 2024"
        );
    }

    #[test]
    fn day_listing_includes_rows() {
        let first = task("task-1", false);
        let second = task("task-2", true);
        let listing = day_listing(date!(2024 - 03 - 15), &[&first, &second]);

        assert!(listing.contains("(1/2 completed)"));
        assert!(listing.contains("task-1"));
        assert!(listing.contains("🌸 title task-2"));
    }

    #[test]
    fn dashboard_celebrates_completed_tasks() {
        let done = task("task-1", true);
        let counts = AggregateCounts {
            for_date: DateCounts {
                total: 1,
                completed: 1,
            },
            total_all: 4,
        };

        let output = dashboard("Good Morning", date!(2024 - 03 - 15), &counts, &[&done]);

        assert!(output.starts_with("Good Morning! 👋"));
        assert!(output.contains("Completed today: 1/1"));
        assert!(output.contains("Total tasks: 4"));
        assert!(output.contains("You've completed 1 task today."));
    }

    #[test]
    fn dashboard_without_tasks_shows_empty_state() {
        let output = dashboard(
            "Good Evening",
            date!(2024 - 03 - 15),
            &AggregateCounts::default(),
            &[],
        );
        assert!(output.contains("No tasks for today"));
    }

    #[test]
    fn month_calendar_marks_days() {
        let tasks = vec![task("task-1", false), task("task-2", true)];
        let month = YearMonth::new(2024, Month::March);
        let grid = view::month_grid(&tasks, month).unwrap();

        let output = month_calendar(month, &grid, date!(2024 - 03 - 01));

        assert!(output.starts_with("March 2024"));
        assert!(output.contains("15•✓"));
        assert!(output.contains("[1]"));
        assert!(output.contains("31"));
    }

    #[test]
    fn month_json_lists_every_day() {
        let month = YearMonth::new(2024, Month::February);
        let grid = view::month_grid(&[], month).unwrap();

        let value = month_json(month, &grid);

        assert_eq!(value["month"], "2024-02");
        assert_eq!(value["previous"], "2024-01");
        assert_eq!(value["next"], "2024-03");
        assert_eq!(value["days"].as_array().unwrap().len(), 29);
        assert_eq!(value["days"][0]["has_pending"], false);
    }
}
