//! Room booking conflicts and next-available-slot suggestion.
//!
//! Bookings are half-open: a boardroom booked 09:00 for two hours is busy over
//! `[09:00, 11:00)`, so a booking starting at 11:00 does not clash with it.
//!
//! All checks assume the caller has already narrowed the existing bookings to
//! the proposed booking's resource and date (see [`bookings_for_day`]).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BookingError, Result};
use crate::parse;

/// Durations are clamped to this so datetime arithmetic stays in range.
const MAX_DURATION_MS: f64 = 1.0e12;

/// Last bookable instant of a day when no closing time is given.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => panic!("23:59:59 is a valid time"),
};

pub fn end_of_day() -> NaiveTime {
    END_OF_DAY
}

/// A bookable space. Each is checked for conflicts on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceType {
    #[serde(rename = "Boardroom")]
    Boardroom,
    #[serde(rename = "Soundproof Pod")]
    SoundproofPod,
}

impl ResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Boardroom => "Boardroom",
            ResourceType::SoundproofPod => "Soundproof Pod",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boardroom" => Ok(ResourceType::Boardroom),
            "soundproof pod" | "soundproof_pod" | "soundproof-pod" | "pod" => {
                Ok(ResourceType::SoundproofPod)
            }
            _ => Err(BookingError::UnknownResource(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A room booking, existing or proposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, deserialize_with = "parse::deserialize_id")]
    pub id: String,
    #[serde(alias = "spaceType", alias = "space_type")]
    pub resource: ResourceType,
    #[serde(alias = "booking_date", deserialize_with = "parse::deserialize_date")]
    pub date: NaiveDate,
    #[serde(alias = "booking_time", deserialize_with = "parse::deserialize_time")]
    pub start_time: NaiveTime,
    #[serde(alias = "duration")]
    pub duration_hours: f64,
    /// Initials of the fee earner who made the booking.
    #[serde(default, alias = "fee_earner", skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Booking {
    pub fn new(
        resource: ResourceType,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_hours: f64,
    ) -> Self {
        Self {
            id: String::new(),
            resource,
            date,
            start_time,
            duration_hours,
            booked_by: None,
            reason: None,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Duration at millisecond precision.
    pub fn duration(&self) -> TimeDelta {
        hours_to_delta(self.duration_hours)
    }

    /// `start + duration`. May fall on the following day.
    pub fn end(&self) -> NaiveDateTime {
        self.start()
            .checked_add_signed(self.duration())
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Check the precondition every conflict check relies on: a finite,
    /// positive duration.
    pub fn validate(&self) -> Result<()> {
        if self.duration_hours.is_finite() && self.duration_hours > 0.0 {
            Ok(())
        } else {
            Err(BookingError::InvalidDuration(self.duration_hours))
        }
    }

    fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end() && end > self.start()
    }
}

fn hours_to_delta(hours: f64) -> TimeDelta {
    // NaN casts to 0.
    let ms = (hours * 3_600_000.0)
        .round()
        .clamp(-MAX_DURATION_MS, MAX_DURATION_MS);
    TimeDelta::milliseconds(ms as i64)
}

/// Outcome of checking a proposed booking against the day's bookings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingConflictResult {
    pub has_conflict: bool,
    /// Latest end among the clashing bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_end: Option<NaiveDateTime>,
    /// Earliest start, at or after `conflict_end`, where a booking of the same
    /// duration fits. `None` with `has_conflict` set means nothing fits today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_start: Option<NaiveTime>,
}

impl BookingConflictResult {
    pub fn clear() -> Self {
        Self::default()
    }
}

/// Select the bookings for one resource on one date.
pub fn bookings_for_day(
    all: &[Booking],
    resource: ResourceType,
    date: NaiveDate,
) -> Vec<Booking> {
    all.iter()
        .filter(|b| b.resource == resource && b.date == date)
        .cloned()
        .collect()
}

/// The first existing booking whose span contains `start`.
///
/// This is the quick check the form runs while only the start time has been
/// entered and the duration is still unknown.
pub fn start_falls_inside(start: NaiveDateTime, existing: &[Booking]) -> Option<&Booking> {
    existing.iter().find(|b| b.start() <= start && start < b.end())
}

/// Check `proposed` against `same_day` with the day ending at 23:59:59.
///
/// See [`check_conflict_until`].
pub fn check_conflict(proposed: &Booking, same_day: &[Booking]) -> BookingConflictResult {
    check_conflict_until(proposed, same_day, end_of_day())
}

/// Check `proposed` against `same_day` and, on a clash, suggest the next start
/// time where a booking of the same duration fits before `day_end`.
///
/// `same_day` must already be limited to the proposed booking's resource and
/// date. The proposed booking must have a positive duration
/// ([`Booking::validate`]); this is not rechecked here.
pub fn check_conflict_until(
    proposed: &Booking,
    same_day: &[Booking],
    day_end: NaiveTime,
) -> BookingConflictResult {
    let start = proposed.start();
    let end = proposed.end();

    let conflict_end = same_day
        .iter()
        .filter(|b| b.overlaps(start, end))
        .map(Booking::end)
        .max();

    let Some(conflict_end) = conflict_end else {
        return BookingConflictResult::clear();
    };

    let day_bound = proposed.date.and_time(day_end);
    let suggested =
        find_next_available_slot(same_day, conflict_end, proposed.duration(), day_bound);

    tracing::debug!(
        %start,
        %conflict_end,
        suggested = ?suggested,
        "booking conflict"
    );

    BookingConflictResult {
        has_conflict: true,
        conflict_end: Some(conflict_end),
        suggested_start: suggested.map(|s| s.time()),
    }
}

/// Find the earliest start at or after `start_after` where `duration` fits
/// without touching any booking and ends no later than `day_bound`.
///
/// Sweeps forward over the bookings in start order: whenever the candidate
/// clashes with a booking it moves to that booking's end. Every booking can
/// push the candidate at most once, so the sweep always terminates.
pub fn find_next_available_slot(
    bookings: &[Booking],
    start_after: NaiveDateTime,
    duration: TimeDelta,
    day_bound: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> =
        bookings.iter().map(|b| (b.start(), b.end())).collect();
    spans.sort_by_key(|&(s, e)| (s, e));

    let mut candidate = start_after;
    loop {
        let candidate_end = candidate.checked_add_signed(duration)?;
        if candidate_end > day_bound {
            return None;
        }

        match spans
            .iter()
            .find(|&&(s, e)| candidate < e && candidate_end > s)
        {
            Some(&(_, busy_until)) => {
                tracing::trace!(%candidate, %busy_until, "slot taken, moving on");
                candidate = busy_until;
            }
            None => return Some(candidate),
        }
    }
}
