//! The month key that scopes one budget record and one sequence of expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::Error;

/// A calendar month in a specific year, written as `YYYY-MM`.
///
/// Month keys order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    /// Create a month key.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `year` cannot be written with four digits.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        if !(0..=9999).contains(&year) {
            return Err(Error::InvalidInput(format!(
                "the year {year} must be between 0 and 9999"
            )));
        }

        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year, e.g. 2024.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: Date) -> bool {
        Self::of(date) == *self
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        // Every month has a first day and the year was checked on construction.
        Date::from_calendar_date(self.year, self.month, 1).unwrap_or(Date::MIN)
    }

    /// The month immediately before this one, or `None` before `0000-01`.
    pub fn previous(&self) -> Option<Self> {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December).ok(),
            month => Some(Self {
                year: self.year,
                month: month.previous(),
            }),
        }
    }

    /// The month immediately after this one, or `None` after `9999-12`.
    pub fn next(&self) -> Option<Self> {
        match self.month {
            Month::December => Self::new(self.year + 1, Month::January).ok(),
            month => Some(Self {
                year: self.year,
                month: month.next(),
            }),
        }
    }

    /// A human friendly label, e.g. "March 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

impl From<Date> for MonthKey {
    fn from(date: Date) -> Self {
        Self::of(date)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidInput(format!("\"{s}\" is not a month of the form YYYY-MM"));

        let text = s.trim();
        let (year, month) = text.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4
            || month.len() != 2
            || !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
