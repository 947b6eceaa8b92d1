//! Inclusive calendar-date ranges and their overlap.
//!
//! Both the leave calculator and the leave conflict grouper work in whole days,
//! so every range here is closed on both ends: `2024-07-01..=2024-07-05` covers
//! five days.

use std::iter;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed calendar-date range `[start, end]`.
///
/// `start <= end` is not enforced. An inverted range covers no days and
/// overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    #[serde(alias = "start_date", alias = "startDate")]
    pub start: NaiveDate,
    #[serde(alias = "end_date", alias = "endDate")]
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every date from `start` to `end` inclusive, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        let first = (!self.is_empty()).then_some(self.start);
        iter::successors(first, |d| d.succ_opt()).take_while(move |d| *d <= end)
    }
}

/// Compute the overlapping range of two closed intervals.
///
/// Returns `None` when the intervals share no day, including when either
/// input is inverted. The result is symmetric in its arguments.
pub fn overlap(a: &DateInterval, b: &DateInterval) -> Option<DateInterval> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);

    if start > end {
        return None;
    }

    Some(DateInterval { start, end })
}

/// The individual days two intervals have in common, for listing in a form.
pub fn overlap_days(a: &DateInterval, b: &DateInterval) -> Vec<NaiveDate> {
    overlap(a, b)
        .map(|o| o.days().collect())
        .unwrap_or_default()
}
