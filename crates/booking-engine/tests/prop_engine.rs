//! Property-based tests for overlap, day counting and slot suggestion.
//!
//! These check invariants that must hold for any input, not just the worked
//! examples in the other test files.

use booking_engine::{
    check_conflict, check_conflict_until, overlap, working_days, Booking, DateInterval,
    ExcludedDates, HalfDayFlags, ResourceType,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// A date somewhere in 2024-2025.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..730).prop_map(|offset| base_date() + Duration::days(offset))
}

/// A normalized interval of up to 60 days.
fn arb_interval() -> impl Strategy<Value = DateInterval> {
    (arb_date(), 0i64..60)
        .prop_map(|(start, len)| DateInterval::new(start, start + Duration::days(len)))
}

/// Any interval, including inverted ones.
fn arb_any_interval() -> impl Strategy<Value = DateInterval> {
    (arb_date(), arb_date()).prop_map(|(a, b)| DateInterval::new(a, b))
}

/// A few bank holidays scattered over the same two years.
fn arb_excluded() -> impl Strategy<Value = ExcludedDates> {
    prop::collection::vec(arb_date(), 0..20).prop_map(|dates| dates.into_iter().collect())
}

fn arb_half_day() -> impl Strategy<Value = HalfDayFlags> {
    (any::<bool>(), any::<bool>()).prop_map(|(half_day_start, half_day_end)| HalfDayFlags {
        half_day_start,
        half_day_end,
    })
}

fn booking_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// A booking on a quarter-hour boundary lasting 15 minutes to 4 hours.
fn arb_booking() -> impl Strategy<Value = Booking> {
    (0u32..96, 1u32..=16).prop_map(|(quarter, len)| {
        let start = NaiveTime::from_hms_opt(quarter / 4, (quarter % 4) * 15, 0).unwrap();
        Booking::new(ResourceType::Boardroom, booking_day(), start, len as f64 * 0.25)
    })
}

fn arb_day_end() -> impl Strategy<Value = NaiveTime> {
    prop_oneof![
        Just(NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
        Just(NaiveTime::from_hms_opt(18, 30, 0).unwrap()),
        Just(NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
    ]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn no_half_days() -> HalfDayFlags {
    HalfDayFlags::default()
}

// ---------------------------------------------------------------------------
// Overlap
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_any_interval(), b in arb_any_interval()) {
        prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
    }

    #[test]
    fn overlap_with_self_is_identity(a in arb_interval()) {
        prop_assert_eq!(overlap(&a, &a), Some(a));
    }

    #[test]
    fn overlap_lies_inside_both(a in arb_interval(), b in arb_interval()) {
        if let Some(o) = overlap(&a, &b) {
            prop_assert!(a.contains(o.start) && a.contains(o.end));
            prop_assert!(b.contains(o.start) && b.contains(o.end));
        }
    }
}

// ---------------------------------------------------------------------------
// Working days
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn extending_by_a_day_adds_at_most_one(
        interval in arb_interval(),
        excluded in arb_excluded(),
    ) {
        let before = working_days(&interval, &excluded, no_half_days());
        let longer = DateInterval::new(interval.start, interval.end + Duration::days(1));
        let after = working_days(&longer, &excluded, no_half_days());

        prop_assert!(after >= before);
        prop_assert!(after - before <= 1.0);
    }

    #[test]
    fn extending_never_drops_more_than_one(
        interval in arb_interval(),
        excluded in arb_excluded(),
        half_day in arb_half_day(),
    ) {
        let before = working_days(&interval, &excluded, half_day);
        let longer = DateInterval::new(interval.start, interval.end + Duration::days(1));
        let after = working_days(&longer, &excluded, half_day);

        prop_assert!(after >= before - 1.0);
    }

    #[test]
    fn both_half_days_cost_at_most_one_day(
        start in arb_date(),
        len in 1i64..60,
        excluded in arb_excluded(),
    ) {
        let interval = DateInterval::new(start, start + Duration::days(len));
        let both = HalfDayFlags { half_day_start: true, half_day_end: true };

        let base = working_days(&interval, &excluded, no_half_days());
        let adjusted = working_days(&interval, &excluded, both);

        prop_assert!(adjusted >= base - 1.0);
        prop_assert!(adjusted >= 0.0);
    }

    #[test]
    fn never_exceeds_calendar_length(
        interval in arb_interval(),
        excluded in arb_excluded(),
        half_day in arb_half_day(),
    ) {
        let calendar_days = interval.days().count() as f64;
        prop_assert!(working_days(&interval, &excluded, half_day) <= calendar_days);
    }
}

// ---------------------------------------------------------------------------
// Booking conflicts
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn conflict_iff_some_booking_overlaps(
        existing in prop::collection::vec(arb_booking(), 0..10),
        proposed in arb_booking(),
    ) {
        let overlaps_any = existing
            .iter()
            .any(|b| proposed.start() < b.end() && proposed.end() > b.start());

        let result = check_conflict(&proposed, &existing);

        prop_assert_eq!(result.has_conflict, overlaps_any);
        if !result.has_conflict {
            prop_assert!(result.conflict_end.is_none());
            prop_assert!(result.suggested_start.is_none());
        }
    }

    #[test]
    fn suggested_slot_is_free_and_within_the_day(
        existing in prop::collection::vec(arb_booking(), 1..10),
        proposed in arb_booking(),
        day_end in arb_day_end(),
    ) {
        let result = check_conflict_until(&proposed, &existing, day_end);

        if let Some(start) = result.suggested_start {
            let slot_start = booking_day().and_time(start);
            let slot_end = slot_start + proposed.duration();

            prop_assert!(slot_end <= booking_day().and_time(day_end));
            prop_assert!(Some(slot_start) >= result.conflict_end);
            for b in &existing {
                prop_assert!(
                    !(slot_start < b.end() && slot_end > b.start()),
                    "suggested {}..{} overlaps {}..{}",
                    slot_start,
                    slot_end,
                    b.start(),
                    b.end()
                );
            }
        }
    }
}
