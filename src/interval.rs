use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, INTERVAL_SEPARATOR, ParseError, Year, civil::Ymd};

const OPEN_BRACKET: char = '[';
const CLOSED_END: char = ']';
const OPEN_END: char = ')';
const BOUND_SEPARATOR: char = ',';

/// A span of calendar days from `start` to `end`.
///
/// The start is always included; `end_inclusive` decides whether `end` is.
/// An interval whose end precedes its start is *degenerate*: it is a legal
/// value and decomposes to zero months and zero days. Use
/// [`Interval::try_new`] when a reversed interval should be rejected instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    start:         CalendarDate,
    end:           CalendarDate,
    end_inclusive: bool,
}

/// Error type for interval construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// End date is before start date.
    #[error("Invalid interval: end ({end}) is before start ({start})")]
    Reversed { start: CalendarDate, end: CalendarDate },

    /// Error parsing one of the bounds.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid interval notation.
    #[error("Invalid interval format: {0}")]
    InvalidFormat(String),
}

impl Interval {
    pub const fn new(start: CalendarDate, end: CalendarDate, end_inclusive: bool) -> Self {
        Self {
            start,
            end,
            end_inclusive,
        }
    }

    /// `[start, end]`
    pub const fn inclusive(start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(start, end, true)
    }

    /// `[start, end)`
    pub const fn exclusive(start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(start, end, false)
    }

    /// Creates an interval, rejecting a reversed one.
    ///
    /// # Errors
    /// Returns `IntervalError::Reversed` if `end < start`.
    pub fn try_new(
        start: CalendarDate,
        end: CalendarDate,
        end_inclusive: bool,
    ) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::Reversed { start, end });
        }
        Ok(Self::new(start, end, end_inclusive))
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub const fn end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    /// Whether the end precedes the start.
    pub fn is_degenerate(&self) -> bool {
        self.end < self.start
    }

    /// Exclusive upper bound: the day after `end` when the end is inclusive.
    /// May lie one day past 9999-12-31.
    pub(crate) const fn effective_end(&self) -> Ymd {
        let end = self.end.to_ymd();
        if self.end_inclusive { end.next_day() } else { end }
    }

    /// Number of days covered, zero for a degenerate interval.
    pub fn len_days(&self) -> u32 {
        if self.is_degenerate() {
            return 0;
        }
        let days = self.start.to_ymd().days_until(self.effective_end());
        u32::try_from(days).unwrap_or(0)
    }

    /// Whether `date` falls inside the interval.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && date.to_ymd() < self.effective_end()
    }

    /// The part of this interval that falls in `year`, or `None` if they
    /// share no day.
    ///
    /// The clipped end keeps this interval's `end_inclusive` flag when the
    /// original end lies in `year`; otherwise it becomes December 31st,
    /// inclusive.
    pub fn clip_to_year(&self, year: Year) -> Option<Self> {
        if self.is_degenerate() {
            return None;
        }

        let first = CalendarDate::first_of_year(year);
        let last = CalendarDate::last_of_year(year);

        let start = self.start.max(first);
        let (end, end_inclusive) = if self.end <= last {
            (self.end, self.end_inclusive)
        } else {
            (last, true)
        };

        if end < start {
            return None;
        }
        Some(Self::new(start, end, end_inclusive))
    }

    fn parse_bounds(start: &str, end: &str, end_inclusive: bool) -> Result<Self, IntervalError> {
        let start = start.trim().parse::<CalendarDate>()?;
        let end = end.trim().parse::<CalendarDate>()?;
        Ok(Self::new(start, end, end_inclusive))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.end_inclusive { CLOSED_END } else { OPEN_END };
        write!(
            f,
            "{OPEN_BRACKET}{}{BOUND_SEPARATOR} {}{close}",
            self.start, self.end
        )
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    /// Accepts `[start, end]`, `[start, end)` and the ISO 8601 interval
    /// notation `start/end` (read as inclusive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(body) = trimmed.strip_prefix(OPEN_BRACKET) {
            let (body, end_inclusive) = if let Some(body) = body.strip_suffix(CLOSED_END) {
                (body, true)
            } else if let Some(body) = body.strip_suffix(OPEN_END) {
                (body, false)
            } else {
                return Err(IntervalError::InvalidFormat(format!(
                    "Missing closing '{CLOSED_END}' or '{OPEN_END}': {s}"
                )));
            };

            let Some((start, end)) = body.split_once(BOUND_SEPARATOR) else {
                return Err(IntervalError::InvalidFormat(format!(
                    "No bound separator found (expected '{BOUND_SEPARATOR}'): {s}"
                )));
            };
            return Self::parse_bounds(start, end, end_inclusive);
        }

        let separator_count = trimmed.matches(INTERVAL_SEPARATOR).count();
        match separator_count {
            0 => Err(IntervalError::InvalidFormat(format!(
                "No interval separator found (expected '{INTERVAL_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start, end) = trimmed.split_once(INTERVAL_SEPARATOR).ok_or_else(|| {
                    IntervalError::InvalidFormat(format!(
                        "Separator '{INTERVAL_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                Self::parse_bounds(start, end, true)
            },
            _ => Err(IntervalError::InvalidFormat(format!(
                "Too many '{INTERVAL_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}
