//! Terse constructors for tests. They panic on invalid input.

use crate::{CalendarDate, Interval, Month, Year};

pub fn year(value: u16) -> Year {
    Year::new(value).unwrap()
}

pub fn month(value: u8) -> Month {
    Month::new(value).unwrap()
}

pub fn date(y: u16, m: u8, d: u8) -> CalendarDate {
    CalendarDate::new(y, m, d).unwrap()
}

/// `[start, end]`
pub fn closed(start: (u16, u8, u8), end: (u16, u8, u8)) -> Interval {
    Interval::inclusive(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
}

/// `[start, end)`
pub fn half_open(start: (u16, u8, u8), end: (u16, u8, u8)) -> Interval {
    Interval::exclusive(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
}
