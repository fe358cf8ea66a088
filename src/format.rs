//! Caller-configured text date formats and the text front-ends of the
//! decomposer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CalendarDate, DEFAULT_SEPARATOR, Decomposition, Interval, ParseError, YEAR_DIGITS, Year,
    decompose, decompose_within_year, prelude::*,
};

const DIRECTIVE: char = '%';
const DAY_DIRECTIVE: char = 'd';
const MONTH_DIRECTIVE: char = 'm';
const YEAR_DIRECTIVE: char = 'Y';
/// Longest accepted day or month field (`"01"`..`"31"`, unpadded allowed)
const MAX_SHORT_FIELD_DIGITS: usize = 2;

/// Order of the three numeric fields in a text date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    /// `%m/%d/%Y`
    #[default]
    MonthDayYear,
    /// `%d/%m/%Y`
    DayMonthYear,
    /// `%Y/%m/%d`
    YearMonthDay,
}

impl FieldOrder {
    const fn directives(self) -> [char; 3] {
        match self {
            Self::MonthDayYear => [MONTH_DIRECTIVE, DAY_DIRECTIVE, YEAR_DIRECTIVE],
            Self::DayMonthYear => [DAY_DIRECTIVE, MONTH_DIRECTIVE, YEAR_DIRECTIVE],
            Self::YearMonthDay => [YEAR_DIRECTIVE, MONTH_DIRECTIVE, DAY_DIRECTIVE],
        }
    }

    fn from_directives(directives: [char; 3]) -> Option<Self> {
        [Self::MonthDayYear, Self::DayMonthYear, Self::YearMonthDay]
            .into_iter()
            .find(|order| order.directives() == directives)
    }
}

/// Error type for invalid `DateFormat` definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid format pattern: {0}")]
    Malformed(String),

    #[error("Unknown directive %{0} (expected %d, %m or %Y)")]
    UnknownDirective(char),

    #[error("Unsupported field order: {0} (expected month/day/year, day/month/year or year/month/day)")]
    UnsupportedOrder(String),

    #[error("Mixed separators ({first} and {second})")]
    MixedSeparators { first: char, second: char },

    #[error("Invalid separator {0:?}")]
    InvalidSeparator(char),
}

/// A numeric text date layout: three fields in a fixed order joined by one
/// separator character.
///
/// Day and month fields may be written without zero padding (`1/5/2025`);
/// the year must have four digits. Serializes as its strftime-style pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateFormat {
    order:     FieldOrder,
    separator: char,
}

impl Default for DateFormat {
    /// `%m/%d/%Y`
    fn default() -> Self {
        Self {
            order:     FieldOrder::MonthDayYear,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl DateFormat {
    /// # Errors
    /// Returns `FormatError::InvalidSeparator` for digits, whitespace and `%`.
    pub fn new(order: FieldOrder, separator: char) -> Result<Self, FormatError> {
        if separator.is_ascii_digit() || separator.is_whitespace() || separator == DIRECTIVE {
            return Err(FormatError::InvalidSeparator(separator));
        }
        Ok(Self { order, separator })
    }

    pub const fn order(&self) -> FieldOrder {
        self.order
    }

    pub const fn separator(&self) -> char {
        self.separator
    }

    /// The strftime-style pattern, e.g. `%m/%d/%Y`.
    pub fn pattern(&self) -> String {
        let [a, b, c] = self.order.directives();
        let sep = self.separator;
        format!("{DIRECTIVE}{a}{sep}{DIRECTIVE}{b}{sep}{DIRECTIVE}{c}")
    }

    /// Parses `text` according to this format.
    ///
    /// # Errors
    /// `ParseError::EmptyInput` for blank text, `ParseError::InvalidFormat`
    /// when the layout does not match, and the field errors of
    /// [`CalendarDate::new`] for out-of-range values.
    pub fn parse(&self, text: &str) -> Result<CalendarDate, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(self.separator).collect();
        let [first, second, third] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected {}, found {} field(s) in {trimmed}",
                self.pattern(),
                parts.len()
            )));
        };

        let (year, month, day) = match self.order {
            FieldOrder::MonthDayYear => (third, first, second),
            FieldOrder::DayMonthYear => (third, second, first),
            FieldOrder::YearMonthDay => (first, second, third),
        };

        if year.len() != YEAR_DIGITS {
            return Err(ParseError::InvalidFormat(format!(
                "Year must have {YEAR_DIGITS} digits: {year}"
            )));
        }
        for field in [month, day] {
            if field.len() > MAX_SHORT_FIELD_DIGITS {
                return Err(ParseError::InvalidFormat((*field).to_owned()));
            }
        }

        let year = CalendarDate::parse_field::<u16>(year)?;
        let month = CalendarDate::parse_field::<u8>(month)?;
        let day = CalendarDate::parse_field::<u8>(day)?;
        CalendarDate::new(year, month, day)
    }

    /// Renders `date` zero-padded in this format.
    pub fn format(&self, date: &CalendarDate) -> String {
        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let [a, b, c] = match self.order {
            FieldOrder::MonthDayYear => [month, day, year],
            FieldOrder::DayMonthYear => [day, month, year],
            FieldOrder::YearMonthDay => [year, month, day],
        };
        let sep = self.separator;
        format!("{a}{sep}{b}{sep}{c}")
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

impl FromStr for DateFormat {
    type Err = FormatError;

    /// Accepts `%d`, `%m` and `%Y`, each exactly once, joined by a single
    /// repeated separator: `%m/%d/%Y`, `%d-%m-%Y`, `%Y.%m.%d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = s.trim();
        let malformed = || FormatError::Malformed(pattern.to_owned());

        let mut chars = pattern.chars();
        let mut directives = ['\0'; 3];
        let mut separator: Option<char> = None;

        for (index, slot) in directives.iter_mut().enumerate() {
            if index > 0 {
                let sep = chars.next().ok_or_else(malformed)?;
                match separator {
                    None => separator = Some(sep),
                    Some(first) if first != sep => {
                        return Err(FormatError::MixedSeparators { first, second: sep });
                    },
                    Some(_) => {},
                }
            }

            if chars.next() != Some(DIRECTIVE) {
                return Err(malformed());
            }
            let directive = chars.next().ok_or_else(malformed)?;
            if ![DAY_DIRECTIVE, MONTH_DIRECTIVE, YEAR_DIRECTIVE].contains(&directive) {
                return Err(FormatError::UnknownDirective(directive));
            }
            *slot = directive;
        }

        if chars.next().is_some() {
            return Err(malformed());
        }

        let order = FieldOrder::from_directives(directives)
            .ok_or_else(|| FormatError::UnsupportedOrder(pattern.to_owned()))?;
        Self::new(order, separator.ok_or_else(malformed)?)
    }
}

impl Serialize for DateFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.pattern())
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which argument of a text front-end failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TextField {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// A text date given to [`decompose_from_text`] or
/// [`decompose_within_year_from_text`] did not match its format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} date {input:?}: {source}")]
pub struct TextError {
    field:  TextField,
    input:  String,
    #[source]
    source: ParseError,
}

impl TextError {
    pub const fn field(&self) -> TextField {
        self.field
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn parse_error(&self) -> &ParseError {
        &self.source
    }
}

fn parse_bound(text: &str, format: &DateFormat, field: TextField) -> Result<CalendarDate, TextError> {
    format.parse(text).map_err(|source| {
        debug!(%field, input = text, %format, error = %source, "rejected text date");
        TextError {
            field,
            input: text.to_owned(),
            source,
        }
    })
}

fn parse_interval(
    start_text: &str,
    end_text: &str,
    format: &DateFormat,
    end_inclusive: bool,
) -> Result<Interval, TextError> {
    let start = parse_bound(start_text, format, TextField::Start)?;
    let end = parse_bound(end_text, format, TextField::End)?;
    Ok(Interval::new(start, end, end_inclusive))
}

/// Parses both dates with `format` and [`decompose`]s the interval between them.
///
/// # Errors
/// Returns `TextError` naming the first text that does not match `format`.
/// A well-formed but reversed pair is not an error and yields zero.
pub fn decompose_from_text(
    start_text: &str,
    end_text: &str,
    format: &DateFormat,
    end_inclusive: bool,
) -> Result<Decomposition, TextError> {
    let interval = parse_interval(start_text, end_text, format, end_inclusive)?;
    Ok(decompose(interval))
}

/// Parses both dates with `format` and runs [`decompose_within_year`].
///
/// # Errors
/// Returns `TextError` naming the first text that does not match `format`.
pub fn decompose_within_year_from_text(
    start_text: &str,
    end_text: &str,
    year: Year,
    format: &DateFormat,
    end_inclusive: bool,
) -> Result<Decomposition, TextError> {
    let interval = parse_interval(start_text, end_text, format, end_inclusive)?;
    Ok(decompose_within_year(interval, year))
}
