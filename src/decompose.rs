use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{CalendarDate, Interval, Year, civil::Ymd};

/// Whole months plus remaining days.
///
/// `days` is always in `0..=30`: a 31-day remainder would contain another
/// whole month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Decomposition {
    months: u32,
    days:   u32,
}

impl Decomposition {
    pub const ZERO: Self = Self { months: 0, days: 0 };

    pub const fn new(months: u32, days: u32) -> Self {
        Self { months, days }
    }

    pub const fn months(&self) -> u32 {
        self.months
    }

    pub const fn days(&self) -> u32 {
        self.days
    }

    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }

    /// `(months, days)`
    pub const fn to_tuple(&self) -> (u32, u32) {
        (self.months, self.days)
    }
}

impl From<Decomposition> for (u32, u32) {
    fn from(value: Decomposition) -> Self {
        value.to_tuple()
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: u32| if n == 1 { "" } else { "s" };
        write!(
            f,
            "{} month{}, {} day{}",
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

/// Adds `months` calendar months to `date`, keeping its day-of-month unless
/// the target month is shorter, in which case the last day of that month is
/// used (2024-01-31 + 1 month = 2024-02-29).
///
/// Returns `None` if the result falls outside years `1..=MAX_YEAR`.
pub fn add_months(date: CalendarDate, months: i32) -> Option<CalendarDate> {
    date.checked_add_months(months)
}

/// Splits `interval` into whole months and remaining days.
///
/// The interval is treated as half-open `[start, E)` where `E` is the day
/// after `end` for an inclusive interval and `end` otherwise. Months are
/// counted from calendar fields: one month is lost when `E`'s day-of-month is
/// smaller than the start's. The remaining days run from `start` advanced by
/// that many months up to `E`.
///
/// A degenerate interval (end before start) yields [`Decomposition::ZERO`]
/// whichever way its end is flagged.
pub fn decompose(interval: Interval) -> Decomposition {
    if interval.is_degenerate() {
        trace!(%interval, "degenerate interval");
        return Decomposition::ZERO;
    }

    let start = interval.start().to_ymd();
    let end = interval.effective_end();

    let mut months = start.months_until(end);
    if end.day < start.day {
        months -= 1;
    }
    let months = months.max(0);

    let cursor = start.add_months(months);
    let (months, days) = match start_to_end(cursor, end) {
        Some(days) => (months, days),
        None => {
            // Anchoring overshot `end`; fall back to counting days only.
            warn!(%interval, months, ?cursor, "month anchoring overshot the interval end");
            (0, start_to_end(start, end).unwrap_or(0))
        },
    };

    let decomposition = Decomposition::new(saturate(months), saturate(days));
    trace!(%interval, %decomposition, "decomposed interval");
    decomposition
}

/// Like [`decompose`], restricted to the days of `interval` that fall in
/// `year` (see [`Interval::clip_to_year`]).
pub fn decompose_within_year(interval: Interval, year: Year) -> Decomposition {
    match interval.clip_to_year(year) {
        Some(clipped) => decompose(clipped),
        None => {
            trace!(%interval, %year, "interval does not overlap year");
            Decomposition::ZERO
        },
    }
}

/// Non-negative day count from `from` to `to`.
fn start_to_end(from: Ymd, to: Ymd) -> Option<i64> {
    let days = from.days_until(to);
    (days >= 0).then_some(days)
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
