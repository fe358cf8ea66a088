use calendar_span::{
    CalendarDate, DateFormat, FieldOrder, Interval, Month, Year, add_months, decompose,
    decompose_from_text, decompose_within_year, last_day_of_month,
};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (1u16..=9998, 1u8..=12, 1u8..=31).prop_map(|(year, month, day)| {
        let day = day.min(month_length(year, month));
        CalendarDate::new(year, month, day).unwrap()
    })
}

/// Dates clustered around February so leap-year boundaries are hit often.
fn arb_february_edge_date() -> impl Strategy<Value = CalendarDate> {
    (
        prop_oneof![Just(1900u16), Just(2000), Just(2023), Just(2024), Just(2025), Just(2100)],
        1u8..=3,
        prop_oneof![Just(1u8), Just(28), Just(29), Just(30), Just(31)],
    )
        .prop_map(|(year, month, day)| {
            let day = day.min(month_length(year, month));
            CalendarDate::new(year, month, day).unwrap()
        })
}

fn month_length(year: u16, month: u8) -> u8 {
    last_day_of_month(Year::new(year).unwrap(), Month::new(month).unwrap())
}

fn effective_end(interval: &Interval) -> CalendarDate {
    if interval.end_inclusive() {
        interval.end().checked_next_day().unwrap()
    } else {
        interval.end()
    }
}

fn month_index(date: &CalendarDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month()) - 1
}

// ── Anchoring ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn add_months_moves_month_index_and_clamps_day(date in arb_date(), months in 0i32..600) {
        if let Some(result) = add_months(date, months) {
            prop_assert_eq!(month_index(&result), month_index(&date) + i64::from(months));
            let last = month_length(result.year(), result.month());
            prop_assert_eq!(result.day(), date.day().min(last));
        }
    }

    #[test]
    fn add_months_then_subtract_returns_when_day_fits(date in arb_date(), months in 0i32..600) {
        if let Some(forward) = add_months(date, months) {
            if forward.day() == date.day() {
                prop_assert_eq!(add_months(forward, -months), Some(date));
            }
        }
    }
}

// ── Decomposition ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn round_trip_lands_on_effective_end(a in arb_date(), b in arb_date(), inclusive in any::<bool>()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let interval = Interval::new(start, end, inclusive);
        let result = decompose(interval);

        let cursor = add_months(start, i32::try_from(result.months()).unwrap()).unwrap();
        prop_assert_eq!(cursor.days_until(effective_end(&interval)), i64::from(result.days()));
    }

    #[test]
    fn remainder_stays_below_a_month(a in arb_date(), b in arb_date(), inclusive in any::<bool>()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let result = decompose(Interval::new(start, end, inclusive));
        prop_assert!(result.days() <= 30, "{:?}", result);
    }

    #[test]
    fn reversed_intervals_are_zero(a in arb_date(), b in arb_date(), inclusive in any::<bool>()) {
        prop_assume!(a != b);
        let (start, end) = if a < b { (b, a) } else { (a, b) };
        prop_assert!(decompose(Interval::new(start, end, inclusive)).is_zero());
    }

    #[test]
    fn leap_boundaries_round_trip(
        a in arb_february_edge_date(),
        b in arb_february_edge_date(),
        inclusive in any::<bool>(),
    ) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let interval = Interval::new(start, end, inclusive);
        let result = decompose(interval);

        prop_assert!(result.days() <= 30);
        let cursor = add_months(start, i32::try_from(result.months()).unwrap()).unwrap();
        prop_assert_eq!(cursor.days_until(effective_end(&interval)), i64::from(result.days()));
    }

    #[test]
    fn months_never_exceed_calendar_distance(a in arb_date(), b in arb_date()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let result = decompose(Interval::inclusive(start, end));
        let end = effective_end(&Interval::inclusive(start, end));
        prop_assert!(i64::from(result.months()) <= month_index(&end) - month_index(&start));
    }
}

// ── Year clipping ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn within_year_never_exceeds_twelve_months(a in arb_date(), b in arb_date(), year in 1u16..=9998) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let year = Year::new(year).unwrap();
        let result = decompose_within_year(Interval::inclusive(start, end), year);
        prop_assert!(result.months() < 12 || result.to_tuple() == (12, 0));
    }

    #[test]
    fn within_year_of_contained_interval_is_identity(date in arb_date(), len in 0i32..11) {
        let end = add_months(date, len).unwrap();
        prop_assume!(end.year() == date.year());
        let interval = Interval::inclusive(date, end);
        let year = Year::new(date.year()).unwrap();
        prop_assert_eq!(decompose_within_year(interval, year), decompose(interval));
    }
}

// ── Text front-end ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn text_matches_typed_decomposition(a in arb_date(), b in arb_date(), inclusive in any::<bool>()) {
        let format = DateFormat::new(FieldOrder::DayMonthYear, '.').unwrap();
        let from_text = decompose_from_text(&format.format(&a), &format.format(&b), &format, inclusive)
            .unwrap();
        prop_assert_eq!(from_text, decompose(Interval::new(a, b, inclusive)));
    }
}

#[test]
fn reference_values() {
    let date = |text: &str| text.parse::<CalendarDate>().unwrap();

    assert_eq!(
        decompose(Interval::inclusive(date("2025-01-01"), date("2025-12-31"))).to_tuple(),
        (12, 0)
    );
    assert_eq!(
        decompose(Interval::inclusive(date("2025-07-10"), date("2025-08-05"))).to_tuple(),
        (0, 27)
    );
    assert_eq!(
        decompose(Interval::exclusive(date("2025-01-31"), date("2025-03-01"))).to_tuple(),
        (1, 1)
    );
    assert_eq!(
        decompose_within_year(
            Interval::inclusive(date("2024-12-15"), date("2025-03-20")),
            Year::new(2025).unwrap()
        )
        .to_tuple(),
        (2, 20)
    );
}

#[test]
fn unparseable_text_is_an_error_not_zero() {
    let format: DateFormat = "%d/%m/%Y".parse().unwrap();
    let result = decompose_from_text("13/45/2025", "14/02/2025", &format, true);
    assert!(result.is_err());
}
