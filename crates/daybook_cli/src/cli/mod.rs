use clap::{Parser, Subcommand};
use daybook_core::config::{
    ConfigOverrides, canonical_name, parse_log_level, parse_notification_mode,
};

#[derive(Parser, Debug)]
#[command(name = "daybook", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: daybook add "Buy milk" --due 2024-03-15 --priority high
    Add {
        title: Option<String>,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
        /// low, medium or high
        #[arg(long, short = 'p', default_value = "medium")]
        priority: String,
        #[arg(long, short = 'd')]
        description: Option<String>,
        /// Free-form; see `daybook categories` for suggestions
        #[arg(long, short = 'c')]
        category: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Mark a task completed, or reopen it
    ///
    /// Example: daybook toggle task-3f2a
    Toggle {
        id: String,
    },
    /// Delete a task
    ///
    /// Example: daybook delete task-3f2a
    Delete {
        id: String,
    },
    /// Edit a task (not available yet)
    Edit {
        id: String,
    },
    /// Show today's dashboard
    Today,
    /// List tasks due on a date
    ///
    /// Example: daybook day 2024-03-15
    Day {
        date: String,
    },
    /// Show the calendar for a month
    ///
    /// Example: daybook month 2024-03
    Month {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },
    /// Show task counts for a date
    ///
    /// Example: daybook stats --date 2024-03-15
    Stats {
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
    /// List suggested categories and emoji
    Categories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StorePath,
    Notifications,
    LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let field =
        canonical_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match field.as_str() {
        "store_path" | "store" => ConfigOverrideTarget::StorePath,
        "notifications" | "notify" => ConfigOverrideTarget::Notifications,
        "log_level" | "log" => ConfigOverrideTarget::LogLevel,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Collects every `--config-override` into a single set of overrides; later
/// values win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::StorePath => {
                if parsed.value.is_empty() {
                    return Err("store_path override cannot be empty".to_string());
                }
                overrides.store_path = Some(parsed.value);
            }
            ConfigOverrideTarget::Notifications => {
                let mode = parse_notification_mode(&parsed.value)
                    .map_err(|err| err.message().to_string())?;
                overrides.notifications = Some(mode);
            }
            ConfigOverrideTarget::LogLevel => {
                let level =
                    parse_log_level(&parsed.value).map_err(|err| err.message().to_string())?;
                overrides.log_level = Some(level);
            }
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::{ConfigOverrideTarget, collect_config_overrides, parse_config_override};
    use daybook_core::config::NotificationMode;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" Log-Level = debug ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::LogLevel);
        assert_eq!(parsed.value, "debug");
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("theme=noir").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("notifications").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_empty_key() {
        let err = parse_config_override(" = off").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn collect_config_overrides_later_values_win() {
        let raw = vec![
            "notifications=desktop".to_string(),
            "store_path=/tmp/a.json".to_string(),
            "notify=off".to_string(),
        ];

        let overrides = collect_config_overrides(&raw).unwrap();

        assert_eq!(overrides.notifications, Some(NotificationMode::Off));
        assert_eq!(overrides.store_path.as_deref(), Some("/tmp/a.json"));
        assert_eq!(overrides.log_level, None);
    }

    #[test]
    fn collect_config_overrides_validates_values() {
        let err = collect_config_overrides(&["log_level=loud".to_string()]).unwrap_err();
        assert!(err.contains("unknown log level"));

        let err = collect_config_overrides(&["store_path=".to_string()]).unwrap_err();
        assert!(err.contains("cannot be empty"));
    }
}
