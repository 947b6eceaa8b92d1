//! Tests for date interval overlap and bank holiday loading.

use booking_engine::holidays::{is_working_day, DEFAULT_DIVISION};
use booking_engine::{overlap, overlap_days, BookingError, DateInterval, ExcludedDates};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateInterval {
    DateInterval::new(start, end)
}

// ── overlap ─────────────────────────────────────────────────────────────────

#[test]
fn partial_overlap() {
    let a = range(date(2024, 7, 1), date(2024, 7, 5));
    let b = range(date(2024, 7, 3), date(2024, 7, 11));

    assert_eq!(overlap(&a, &b), Some(range(date(2024, 7, 3), date(2024, 7, 5))));
    assert_eq!(
        overlap_days(&a, &b),
        vec![date(2024, 7, 3), date(2024, 7, 4), date(2024, 7, 5)]
    );
}

#[test]
fn contained_interval_is_the_overlap() {
    let outer = range(date(2024, 7, 1), date(2024, 7, 31));
    let inner = range(date(2024, 7, 10), date(2024, 7, 12));

    assert_eq!(overlap(&outer, &inner), Some(inner));
}

#[test]
fn disjoint_intervals_do_not_overlap() {
    let a = range(date(2024, 7, 1), date(2024, 7, 5));
    let b = range(date(2024, 7, 6), date(2024, 7, 9));

    assert_eq!(overlap(&a, &b), None);
    assert!(overlap_days(&a, &b).is_empty());
}

#[test]
fn shared_boundary_day_overlaps() {
    let a = range(date(2024, 7, 1), date(2024, 7, 5));
    let b = range(date(2024, 7, 5), date(2024, 7, 9));

    assert_eq!(overlap(&a, &b), Some(DateInterval::single(date(2024, 7, 5))));
}

#[test]
fn inverted_interval_overlaps_nothing() {
    let inverted = range(date(2024, 7, 9), date(2024, 7, 1));
    let normal = range(date(2024, 6, 1), date(2024, 8, 1));

    assert_eq!(overlap(&inverted, &normal), None);
    assert_eq!(overlap(&normal, &inverted), None);
}

// ── Bank holidays ───────────────────────────────────────────────────────────

const FEED: &str = r#"{
  "england-and-wales": {
    "division": "england-and-wales",
    "events": [
      {"title": "New Year’s Day", "date": "2024-01-01", "notes": "", "bunting": true},
      {"title": "Christmas Day", "date": "2024-12-25", "notes": "", "bunting": true},
      {"title": "New Year’s Day", "date": "2025-01-01", "notes": "", "bunting": true}
    ]
  },
  "scotland": {
    "division": "scotland",
    "events": [
      {"title": "St Andrew’s Day", "date": "2024-12-02", "notes": "", "bunting": true}
    ]
  }
}"#;

#[test]
fn feed_keeps_requested_division() {
    let excluded = ExcludedDates::from_gov_uk_json(FEED, DEFAULT_DIVISION, None).unwrap();

    assert_eq!(excluded.len(), 3);
    assert!(excluded.contains(date(2024, 12, 25)));
    assert!(!excluded.contains(date(2024, 12, 2)));
}

#[test]
fn feed_can_be_limited_to_one_year() {
    let excluded = ExcludedDates::from_gov_uk_json(FEED, DEFAULT_DIVISION, Some(2024)).unwrap();

    assert_eq!(excluded.len(), 2);
    assert!(!excluded.contains(date(2025, 1, 1)));
}

#[test]
fn unknown_division_is_an_error() {
    let err = ExcludedDates::from_gov_uk_json(FEED, "northern-ireland", None).unwrap_err();
    assert!(matches!(err, BookingError::UnknownDivision(ref d) if d == "northern-ireland"));
}

#[test]
fn malformed_feed_is_an_error() {
    let err = ExcludedDates::from_gov_uk_json("[1, 2, 3]", DEFAULT_DIVISION, None).unwrap_err();
    assert!(matches!(err, BookingError::BankHolidays(_)));
}

#[test]
fn working_day_test() {
    let excluded: ExcludedDates = [date(2024, 12, 25)].into_iter().collect();

    assert!(is_working_day(date(2024, 12, 24), &excluded)); // Tuesday
    assert!(!is_working_day(date(2024, 12, 25), &excluded)); // Christmas
    assert!(!is_working_day(date(2024, 12, 28), &excluded)); // Saturday
    assert!(!is_working_day(date(2024, 12, 29), &excluded)); // Sunday
}

#[test]
fn sorted_dates_are_in_calendar_order() {
    let mut excluded = ExcludedDates::new();
    excluded.extend([date(2024, 12, 25), date(2024, 1, 1), date(2024, 8, 26)]);
    assert!(!excluded.insert(date(2024, 1, 1)));

    assert_eq!(
        excluded.sorted(),
        vec![date(2024, 1, 1), date(2024, 8, 26), date(2024, 12, 25)]
    );
}

// ── Day iteration ───────────────────────────────────────────────────────────

#[test]
fn days_is_inclusive() {
    let days: Vec<_> = range(date(2024, 2, 27), date(2024, 3, 1)).days().collect();
    assert_eq!(
        days,
        vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
    );
}

#[test]
fn inverted_interval_has_no_days() {
    let iv = range(date(2024, 3, 2), date(2024, 3, 1));
    assert!(iv.is_empty());
    assert_eq!(iv.days().count(), 0);
}

#[test]
fn days_stops_at_max_date() {
    assert_eq!(DateInterval::single(NaiveDate::MAX).days().count(), 1);
}
