//! Whole months and remaining days between calendar dates.
//!
//! The central operation is [`decompose`]: it splits an [`Interval`] into a
//! count of whole calendar months and the days left over, anchoring month
//! steps on the start date's day-of-month (clamped to shorter months, so
//! January 31st plus one month is the last day of February).

mod civil;
mod consts;
mod decompose;
mod format;
mod interval;
mod prelude;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use decompose::{Decomposition, add_months, decompose, decompose_within_year};
pub use format::{
    DateFormat, FieldOrder, FormatError, TextError, TextField, decompose_from_text,
    decompose_within_year_from_text,
};
pub use interval::{Interval, IntervalError};
pub use types::{Day, Month, Year, is_leap_year, last_day_of_month};

use crate::civil::Ymd;
use crate::prelude::*;
use std::str::FromStr;

/// A valid proleptic Gregorian date between 0001-01-01 and 9999-12-31.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components, validating each of them.
    ///
    /// # Errors
    /// Returns the first `ParseError` among year, month and day.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        Self::from_parts(year, month, day)
    }

    /// Creates a date from an already validated year and month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn from_parts(year: Year, month: Month, day: u8) -> Result<Self, ParseError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// January 1st of `year`
    pub fn first_of_year(year: Year) -> Self {
        let month = Month::MIN;
        Self {
            year,
            month,
            day: Day::first(),
        }
    }

    /// December 31st of `year`
    pub fn last_of_year(year: Year) -> Self {
        let month = Month::MAX;
        Self {
            year,
            month,
            day: Day::last_of(year, month),
        }
    }

    /// Returns the year as u16
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month as u8
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of month as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Whether this is the last day of its month (Feb 29 in leap years).
    pub const fn is_last_day_of_month(&self) -> bool {
        self.day.get() == self.month.length_in(self.year)
    }

    /// The following day, or `None` past 9999-12-31.
    pub fn checked_next_day(self) -> Option<Self> {
        Self::from_ymd(self.to_ymd().next_day())
    }

    /// Adds `months` calendar months (negative values step back), clamping
    /// the day to the last day of the target month.
    ///
    /// Returns `None` if the result falls outside years `1..=MAX_YEAR`.
    pub fn checked_add_months(self, months: i32) -> Option<Self> {
        Self::from_ymd(self.to_ymd().add_months(i64::from(months)))
    }

    /// Signed number of days from `self` to `other`.
    pub const fn days_until(self, other: Self) -> i64 {
        self.to_ymd().days_until(other.to_ymd())
    }

    pub(crate) const fn to_ymd(self) -> Ymd {
        Ymd::new(self.year.get() as i32, self.month.get(), self.day.get())
    }

    pub(crate) fn from_ymd(ymd: Ymd) -> Option<Self> {
        let year = u16::try_from(ymd.year).ok()?;
        Self::new(year, ymd.month, ymd.day).ok()
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses ISO 8601 calendar dates: `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(ISO_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{ISO_SEPARATOR}MM{ISO_SEPARATOR}DD, found {} field(s) in {trimmed}",
                parts.len()
            )));
        };

        if year.len() != YEAR_DIGITS {
            return Err(ParseError::InvalidFormat(format!(
                "Year must have {YEAR_DIGITS} digits: {year}"
            )));
        }

        let year = Self::parse_field::<u16>(year)?;
        let month = Self::parse_field::<u8>(month)?;
        let day = Self::parse_field::<u8>(day)?;
        Self::new(year, month, day)
    }
}

impl CalendarDate {
    /// Parses a numeric field. Only ASCII digits are accepted, so signs and
    /// inner whitespace are rejected.
    pub(crate) fn parse_field<T: FromStr>(s: &str) -> Result<T, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
