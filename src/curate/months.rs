use std::{fmt, fmt::Write, str::FromStr};

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc,
    format::{Item, StrftimeItems},
};

use crate::{CurateError, Res};

/// A calendar month in UTC, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Month containing `instant`.
    pub fn of(instant: &DateTime<Utc>) -> Self {
        Self(instant.date_naive().with_day(1).unwrap_or(instant.date_naive()))
    }

    pub fn current() -> Self {
        Self::of(&Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// First instant of the month, `YYYY-MM-01T00:00:00Z`.
    pub fn start(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    pub fn months_back(&self, months: u32) -> Option<Self> {
        self.0.checked_sub_months(Months::new(months)).map(Self)
    }

    /// Every month from `start` to `end`, both included, oldest first.
    pub fn range_inclusive(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
        let mut months = Vec::new();
        let mut current = Some(start);
        while let Some(month) = current.filter(|m| *m <= end) {
            months.push(month);
            current = month.next();
        }
        months
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = CurateError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Res<Self> {
        let invalid = || CurateError::Argument(format!("expected YYYY-MM, got {:?}", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// How the month part of a monthly playlist name is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFormat {
    /// `September 2025`
    MonthYear,
    /// `2025-09`
    YearMonth,
    /// A strftime template, e.g. `%b %y`.
    Custom(String),
}

impl MonthFormat {
    fn render(&self, date: NaiveDate) -> String {
        match self {
            MonthFormat::MonthYear => date.format("%B %Y").to_string(),
            MonthFormat::YearMonth => date.format("%Y-%m").to_string(),
            MonthFormat::Custom(template) => {
                let mut out = String::new();
                match write!(out, "{}", date.format(template)) {
                    Ok(()) => out,
                    Err(_) => MonthFormat::MonthYear.render(date),
                }
            }
        }
    }
}

impl FromStr for MonthFormat {
    type Err = CurateError;

    /// Accepts `month_year`, `yyyy_mm` and `custom:<template>`.
    ///
    /// A bare `custom` means `%B %Y`; anything else unknown falls back to
    /// `month_year`. A template chrono cannot parse is a configuration error.
    fn from_str(s: &str) -> Res<Self> {
        let value = s.trim();
        match value {
            "month_year" => Ok(MonthFormat::MonthYear),
            "yyyy_mm" => Ok(MonthFormat::YearMonth),
            custom if custom.starts_with("custom") => {
                let template = match custom.split_once(':') {
                    Some((_, template)) => template,
                    None => "%B %Y",
                };
                if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
                    return Err(CurateError::Config(format!(
                        "invalid month format {:?}",
                        template
                    )));
                }
                Ok(MonthFormat::Custom(template.to_string()))
            }
            other => {
                log::debug!("unknown month format {:?}, using month_year", other);
                Ok(MonthFormat::MonthYear)
            }
        }
    }
}

/// Naming rule for monthly playlists: optional prefix plus formatted month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNaming {
    prefix: String,
    format: MonthFormat,
}

impl MonthNaming {
    pub fn new(prefix: &str, format: MonthFormat) -> Self {
        Self {
            prefix: prefix.trim().to_string(),
            format,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn format(&self) -> &MonthFormat {
        &self.format
    }

    pub fn name_for(&self, month: MonthKey) -> String {
        format_month(month, &self.prefix, &self.format)
    }
}

/// Playlist name for `month`: `"<prefix> <month>"`, or just the month when the
/// trimmed prefix is empty.
pub fn format_month(month: MonthKey, prefix: &str, format: &MonthFormat) -> String {
    let name = format.render(month.first_day());
    match prefix.trim() {
        "" => name,
        prefix => format!("{} {}", prefix, name),
    }
}
