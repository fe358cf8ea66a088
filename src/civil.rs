//! Unchecked proleptic Gregorian arithmetic on plain `(year, month, day)` triples.
//!
//! The public [`CalendarDate`](crate::CalendarDate) is bounded to years
//! `1..=9999`, but interval arithmetic needs to step one day past
//! 9999-12-31 (an inclusive end is turned into an exclusive one). `Ymd` is
//! that unbounded working representation; it never leaves the crate.

use crate::consts::{
    DAYS_PER_ERA, DAYS_TO_UNIX_EPOCH, DECEMBER, JANUARY, MIN_DAY, MONTHS_PER_YEAR,
};
use crate::types::days_in_month;

/// Field order gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Ymd {
    pub(crate) year:  i32,
    pub(crate) month: u8,
    pub(crate) day:   u8,
}

impl Ymd {
    pub(crate) const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// The following calendar day.
    pub(crate) const fn next_day(self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            Self::new(self.year, self.month, self.day + 1)
        } else if self.month == DECEMBER {
            Self::new(self.year + 1, JANUARY, MIN_DAY)
        } else {
            Self::new(self.year, self.month + 1, MIN_DAY)
        }
    }

    /// Months since year 0, January.
    const fn month_index(self) -> i64 {
        self.year as i64 * MONTHS_PER_YEAR + (self.month as i64 - 1)
    }

    /// Adds `months` calendar months, clamping the day to the end of the
    /// target month when it does not exist there (Jan 31 + 1 -> Feb 28/29).
    pub(crate) const fn add_months(self, months: i64) -> Self {
        let index = self.month_index() + months;
        let year = index.div_euclid(MONTHS_PER_YEAR) as i32;
        let month = (index.rem_euclid(MONTHS_PER_YEAR) + 1) as u8;
        let last = days_in_month(year, month);
        let day = if self.day < last { self.day } else { last };
        Self::new(year, month, day)
    }

    /// Signed whole-month distance from `self` to `other`, ignoring days.
    pub(crate) const fn months_until(self, other: Self) -> i64 {
        other.month_index() - self.month_index()
    }

    /// Days since 1970-01-01.
    ///
    /// ref: <http://howardhinnant.github.io/date_algorithms.html>
    pub(crate) const fn to_epoch_days(self) -> i64 {
        let month = self.month as i64;
        let year = if month <= 2 {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = year.div_euclid(400);
        let year_of_era = year.rem_euclid(400);
        let shifted_month = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * shifted_month + 2) / 5 + self.day as i64 - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * DAYS_PER_ERA + day_of_era - DAYS_TO_UNIX_EPOCH
    }

    /// Signed number of days from `self` to `other`.
    pub(crate) const fn days_until(self, other: Self) -> i64 {
        other.to_epoch_days() - self.to_epoch_days()
    }
}
