//! Overlap between a proposed leave request and the rest of the team's leave.
//!
//! The leave form shows, for every colleague whose leave touches the dates
//! being requested, which days overlap and what state that colleague's leave
//! is in. [`group_conflicts`] builds that view.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BookingError;
use crate::interval::{self, DateInterval};

/// Lifecycle state of a leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Submitted and awaiting approval. Also used as the aggregate status of a
    /// conflict group whose records disagree.
    Requested,
    Approved,
    /// Approved and confirmed by the requester; the person is out.
    Booked,
    Rejected,
    Discarded,
    /// Rejected and seen by the requester.
    Acknowledged,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Requested => "requested",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Booked => "booked",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Discarded => "discarded",
            LeaveStatus::Acknowledged => "acknowledged",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = BookingError;

    /// Case-insensitive; leave records arrive as `"Approved"`, `"approved"` or
    /// `"APPROVED"` depending on who wrote them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "requested" => Ok(LeaveStatus::Requested),
            "approved" => Ok(LeaveStatus::Approved),
            "booked" => Ok(LeaveStatus::Booked),
            "rejected" => Ok(LeaveStatus::Rejected),
            "discarded" => Ok(LeaveStatus::Discarded),
            "acknowledged" => Ok(LeaveStatus::Acknowledged),
            _ => Err(BookingError::UnknownStatus(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LeaveStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A person's initials, e.g. `"AB"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new(initials: impl Into<String>) -> Self {
        Self(initials.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Loose match used for roster lookups: surrounding whitespace and case
    /// are ignored.
    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A leave record from the team roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub person: PersonId,
    #[serde(flatten)]
    pub interval: DateInterval,
    pub status: LeaveStatus,
}

/// One colleague's leave that overlaps the proposed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictGroup {
    pub person: PersonId,
    /// Distinct overlapping ranges in the order they were found.
    pub overlapping_ranges: Vec<DateInterval>,
    /// The shared status of the overlapping records, or `Requested` when
    /// they disagree.
    pub aggregate_status: LeaveStatus,
}

/// Group roster leave that overlaps any of the `proposed` ranges by person.
///
/// Every roster record is compared with every proposed range. Groups come back
/// in the order their person was first seen in `roster`; within a group the
/// ranges are deduplicated and keep first-seen order.
pub fn group_conflicts(proposed: &[DateInterval], roster: &[LeaveRequest]) -> Vec<ConflictGroup> {
    let mut groups: Vec<ConflictGroup> = Vec::new();
    let mut index: HashMap<&PersonId, usize> = HashMap::new();

    for record in roster {
        for range in proposed {
            let Some(shared) = interval::overlap(&record.interval, range) else {
                continue;
            };

            match index.get(&record.person) {
                Some(&i) => {
                    let group = &mut groups[i];
                    if !group.overlapping_ranges.contains(&shared) {
                        group.overlapping_ranges.push(shared);
                    }
                    if group.aggregate_status != record.status {
                        group.aggregate_status = LeaveStatus::Requested;
                    }
                }
                None => {
                    index.insert(&record.person, groups.len());
                    groups.push(ConflictGroup {
                        person: record.person.clone(),
                        overlapping_ranges: vec![shared],
                        aggregate_status: record.status,
                    });
                }
            }
        }
    }

    tracing::debug!(
        proposed = proposed.len(),
        roster = roster.len(),
        groups = groups.len(),
        "grouped leave conflicts"
    );

    groups
}

/// Whether `person` has booked leave covering `date`.
pub fn is_on_leave(roster: &[LeaveRequest], person: &str, date: NaiveDate) -> bool {
    roster.iter().any(|r| {
        r.status == LeaveStatus::Booked && r.person.matches(person) && r.interval.contains(date)
    })
}

/// How many of `days` `person` spends on booked leave.
pub fn leave_days_in(roster: &[LeaveRequest], person: &str, days: &[NaiveDate]) -> usize {
    days.iter()
        .filter(|d| is_on_leave(roster, person, **d))
        .count()
}

/// Everyone with booked leave covering `date`, in roster order, without
/// repeats.
pub fn people_on_leave(roster: &[LeaveRequest], date: NaiveDate) -> Vec<PersonId> {
    let mut out: Vec<PersonId> = Vec::new();
    for r in roster {
        if r.status == LeaveStatus::Booked
            && r.interval.contains(date)
            && !out.iter().any(|p| p.matches(r.person.as_str()))
        {
            out.push(r.person.clone());
        }
    }
    out
}
