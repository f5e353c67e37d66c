//! One run of the application: resolved config, logging and the task store.

use crate::cli::Command;
use crate::render;
use daybook_core::config::{self, Config, ConfigOverrides, NotificationMode};
use daybook_core::error::AppError;
use daybook_core::model::{self, Priority, TaskDraft, YearMonth, parse_date};
use daybook_core::notify::{self, Notice, Notifier, NoopNotifier};
use daybook_core::storage::JsonFileStore;
use daybook_core::store::TaskStore;
use daybook_core::view;
use flexi_logger::{Logger, LoggerHandle};
use std::cell::Cell;
use std::rc::Rc;

/// Prints notices to the terminal; stderr keeps JSON output parseable.
/// The stream flag is shared with the session so it can follow each command.
pub struct ConsoleNotifier {
    to_stderr: Rc<Cell<bool>>,
}

impl ConsoleNotifier {
    pub fn new(to_stderr: Rc<Cell<bool>>) -> Self {
        Self { to_stderr }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        if self.to_stderr.get() {
            eprintln!("{}: {}", notice.title, notice.body);
        } else {
            println!("{}: {}", notice.title, notice.body);
        }
        Ok(())
    }
}

pub fn notifier_for(mode: NotificationMode, json_output: Rc<Cell<bool>>) -> Box<dyn Notifier> {
    match mode {
        NotificationMode::Off => Box::new(NoopNotifier),
        NotificationMode::Console => Box::new(ConsoleNotifier::new(json_output)),
        NotificationMode::Desktop => match notify::desktop_notifier() {
            Ok(notifier) => notifier,
            Err(err) => {
                log::warn!("falling back to console notices: {err}");
                Box::new(ConsoleNotifier::new(json_output))
            }
        },
    }
}

/// Loads the config file, applying CLI overrides on top. A broken config file
/// is reported and replaced by defaults.
pub fn resolve_config(overrides: &ConfigOverrides) -> Config {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: ignoring config: {err}");
    }
    config::merge_overrides(&loaded.config, overrides)
}

pub fn init_logging(config: &Config) -> Result<LoggerHandle, AppError> {
    Logger::try_with_env_or_str(config.log_level())
        .map_err(|err| AppError::invalid_input(format!("invalid log level: {err}")))?
        .log_to_stderr()
        .start()
        .map_err(|err| AppError::io(format!("failed to start logger: {err}")))
}

pub struct Session {
    store: TaskStore<JsonFileStore>,
    json_output: Rc<Cell<bool>>,
}

impl Session {
    pub fn open(config: &Config, json: bool) -> Result<Self, AppError> {
        let path = config.resolve_store_path()?;
        log::debug!("opening store at {}", path.display());
        let json_output = Rc::new(Cell::new(json));
        let notifier = notifier_for(config.notification_mode(), Rc::clone(&json_output));
        let store = TaskStore::open(JsonFileStore::new(path), notifier)?;
        Ok(Self { store, json_output })
    }

    pub fn run(&mut self, command: Command, json: bool) -> Result<(), AppError> {
        self.json_output.set(json);
        match command {
            Command::Add {
                title,
                due,
                priority,
                description,
                category,
                emoji,
            } => {
                let title = match title {
                    Some(value) if !value.trim().is_empty() => value,
                    _ => return Err(AppError::invalid_input("title is required")),
                };
                let due_date = match due {
                    Some(raw) => parse_date(&raw)?,
                    None => view::today_local(),
                };
                let priority: Priority = priority.parse()?;

                let mut draft = TaskDraft::new(title, due_date).with_priority(priority);
                draft.description = description;
                draft.category = category;
                draft.emoji = emoji;

                let task = self.store.add(draft)?;
                if json {
                    println!("{}", render::task_json(&task)?);
                } else {
                    println!("Added task: {} ({})", task.title, task.id);
                }
            }
            Command::Toggle { id } => {
                let toggle = self.store.toggle_complete(&id)?;
                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "task": render::task_json(&toggle.task)?,
                            "was_completed": toggle.was_completed,
                        })
                    );
                } else if toggle.task.completed {
                    println!("Completed task: {} ({})", toggle.task.title, toggle.task.id);
                } else {
                    println!("Reopened task: {} ({})", toggle.task.title, toggle.task.id);
                }
            }
            Command::Delete { id } => {
                let task = self.store.delete(&id)?;
                if json {
                    println!("{}", render::task_json(&task)?);
                } else {
                    println!("Deleted task: {} ({})", task.title, task.id);
                }
            }
            Command::Edit { id } => {
                self.store.edit(&id)?;
                if json {
                    println!("{}", serde_json::json!({ "id": id.trim(), "edited": false }));
                }
            }
            Command::Today => {
                let today = view::today_local();
                let greeting = view::greeting(view::now_local().hour());
                let tasks = self.store.tasks();
                let listed = view::tasks_for_date(tasks, today);
                let counts = view::aggregate_counts(tasks, today);
                if json {
                    println!(
                        "{}",
                        render::dashboard_json(greeting, today, &counts, &listed)?
                    );
                } else {
                    println!("{}", render::dashboard(greeting, today, &counts, &listed));
                }
            }
            Command::Day { date } => {
                let date = parse_date(&date)?;
                let listed = view::tasks_for_date(self.store.tasks(), date);
                if json {
                    println!("{}", render::tasks_json(&listed)?);
                } else {
                    println!("{}", render::day_listing(date, &listed));
                }
            }
            Command::Month { month } => {
                let today = view::today_local();
                let month = match month {
                    Some(raw) => raw.parse::<YearMonth>()?,
                    None => YearMonth::of(today),
                };
                let grid = view::month_grid(self.store.tasks(), month)?;
                if json {
                    println!("{}", render::month_json(month, &grid));
                } else {
                    println!("{}", render::month_calendar(month, &grid, today));
                }
            }
            Command::Stats { date } => {
                let date = match date {
                    Some(raw) => parse_date(&raw)?,
                    None => view::today_local(),
                };
                let counts = view::aggregate_counts(self.store.tasks(), date);
                if json {
                    println!("{}", render::stats_json(date, &counts));
                } else {
                    println!("{}", render::stats(date, &counts));
                }
            }
            Command::Categories => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "categories": model::SUGGESTED_CATEGORIES,
                            "emoji": model::EMOJI_CHOICES,
                            "default_emoji": model::DEFAULT_EMOJI,
                        })
                    );
                } else {
                    println!("Categories: {}", model::SUGGESTED_CATEGORIES.join(", "));
                    println!("Emoji: {}", model::EMOJI_CHOICES.join(" "));
                }
            }
        }

        Ok(())
    }
}
