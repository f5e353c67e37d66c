use crate::error::AppError;
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month};

time::serde::format_description!(pub due_date_format, Date, "[year]-[month]-[day]");

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("date is required"));
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::invalid_input(format!("date must be YYYY-MM-DD: {trimmed}")))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// `Mar 15` style label used in notices.
pub fn short_date_label(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| format_date(date))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        }
    }

    pub fn next(self) -> Self {
        match self.month {
            Month::December => Self::new(self.year + 1, Month::January),
            month => Self::new(self.year, month.next()),
        }
    }

    pub fn first_day(self) -> Result<Date, AppError> {
        Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|err| AppError::invalid_input(err.to_string()))
    }

    /// Every date of the month, in order.
    pub fn days(self) -> Result<Vec<Date>, AppError> {
        let mut days = Vec::with_capacity(31);
        let mut current = Some(self.first_day()?);
        while let Some(date) = current {
            if date.month() != self.month {
                break;
            }
            days.push(date);
            current = date.next_day();
        }
        Ok(days)
    }

    pub fn label(self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::invalid_input(format!("month must be YYYY-MM: {}", raw.trim()));
        let (year_raw, month_raw) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year_raw.len() != 4 || month_raw.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_raw.parse().map_err(|_| invalid())?;
        let month_number: u8 = month_raw.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month_number).map_err(|_| invalid())?;
        Ok(Self::new(year, month))
    }
}
