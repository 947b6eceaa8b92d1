//! Chargeable leave day counting.
//!
//! A leave request is charged one day for every working day it covers, less
//! half a day for each half-day boundary the requester ticked.

use serde::{Deserialize, Serialize};

use crate::holidays::{is_working_day, ExcludedDates};
use crate::interval::DateInterval;

/// Half-day modifiers on the first and last day of a requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HalfDayFlags {
    #[serde(default, alias = "halfDayStart")]
    pub half_day_start: bool,
    #[serde(default, alias = "halfDayEnd")]
    pub half_day_end: bool,
}

/// One range on a leave form together with its half-day flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRange {
    #[serde(flatten)]
    pub interval: DateInterval,
    #[serde(flatten)]
    pub half_day: HalfDayFlags,
}

/// Count the chargeable leave days in `interval`.
///
/// Weekends and `excluded` dates are free. Each half-day flag takes 0.5 off,
/// but only if its boundary date is itself a working day.
///
/// A single-day range with both flags set has both subtractions applied and
/// yields 0.0. An inverted interval yields 0.0 with no half-day adjustment.
/// The result is never clamped.
pub fn working_days(
    interval: &DateInterval,
    excluded: &ExcludedDates,
    half_day: HalfDayFlags,
) -> f64 {
    if interval.is_empty() {
        return 0.0;
    }

    let base = interval
        .days()
        .filter(|d| is_working_day(*d, excluded))
        .count() as f64;

    let mut total = base;
    if half_day.half_day_start && is_working_day(interval.start, excluded) {
        total -= 0.5;
    }
    if half_day.half_day_end && is_working_day(interval.end, excluded) {
        total -= 0.5;
    }

    total
}

/// Sum [`working_days`] over every range of a multi-range leave request.
pub fn total_working_days(ranges: &[LeaveRange], excluded: &ExcludedDates) -> f64 {
    ranges
        .iter()
        .map(|r| working_days(&r.interval, excluded, r.half_day))
        .sum()
}
