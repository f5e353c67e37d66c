use crate::error::AppError;
use crate::model::due_date_format;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

pub const DEFAULT_EMOJI: &str = "💖";

pub const EMOJI_CHOICES: [&str; 10] = ["💖", "✨", "🌸", "🦄", "🌟", "💫", "🎀", "🌺", "🍃", "🌈"];

/// Offered by the add form; any other value is accepted as-is.
pub const SUGGESTED_CATEGORIES: [&str; 6] =
    ["Work", "Personal", "Health", "Shopping", "Study", "Fun"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "due_date_format")]
    pub due_date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Task {
    pub(crate) fn from_draft(id: String, draft: TaskDraft) -> Result<Self, AppError> {
        let draft = draft.normalized()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            category: draft.category,
            emoji: draft.emoji,
        })
    }

    /// Cleans up a stored record: trimmed title, blank optionals dropped.
    /// A missing emoji stays missing.
    pub(crate) fn normalized(self) -> Result<Self, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_data(format!("task {} has no title", self.id)));
        }

        Ok(Self {
            title: title.to_string(),
            description: non_blank(self.description),
            category: non_blank(self.category),
            emoji: non_blank(self.emoji),
            ..self
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::invalid_input(format!(
                "priority must be low, medium or high: {other}"
            ))),
        }
    }
}

/// Everything a new task needs except the id and completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Date,
    pub category: Option<String>,
    pub emoji: Option<String>,
}

impl TaskDraft {
    pub fn new<T: Into<String>>(title: T, due_date: Date) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date,
            category: None,
            emoji: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category<T: Into<String>>(mut self, category: T) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_emoji<T: Into<String>>(mut self, emoji: T) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Trims text fields, drops blank optionals and fills the default emoji.
    pub fn normalized(self) -> Result<Self, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        Ok(Self {
            title: title.to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            due_date: self.due_date,
            category: non_blank(self.category),
            emoji: non_blank(self.emoji).or_else(|| Some(DEFAULT_EMOJI.to_string())),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
