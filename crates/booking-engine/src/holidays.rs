//! Non-working dates and the working-day test.
//!
//! Bank holidays normally come from the GOV.UK feed at
//! `https://www.gov.uk/bank-holidays.json`, which groups events by division:
//!
//! ```json
//! { "england-and-wales": { "division": "england-and-wales",
//!                          "events": [ { "title": "New Year’s Day", "date": "2024-01-01" } ] } }
//! ```
//!
//! Fetching the document is the caller's job; this module only reads it.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::{BookingError, Result};

/// The division used by the London office.
pub const DEFAULT_DIVISION: &str = "england-and-wales";

/// A set of dates that never count as working days (bank holidays, office
/// closures). Membership test only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedDates {
    dates: HashSet<NaiveDate>,
}

#[derive(Deserialize)]
struct FeedDivision {
    events: Vec<FeedEvent>,
}

#[derive(Deserialize)]
struct FeedEvent {
    date: NaiveDate,
}

impl ExcludedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a GOV.UK bank holidays document, keeping one division.
    ///
    /// When `year` is given only that calendar year's dates are kept, which is
    /// how the home dashboard loads them.
    ///
    /// # Errors
    /// Returns `BookingError::BankHolidays` if the document is not valid feed
    /// JSON, and `BookingError::UnknownDivision` if `division` is missing.
    pub fn from_gov_uk_json(json: &str, division: &str, year: Option<i32>) -> Result<Self> {
        let mut feed: HashMap<String, FeedDivision> = serde_json::from_str(json)?;
        let events = feed
            .remove(division)
            .ok_or_else(|| BookingError::UnknownDivision(division.to_string()))?
            .events;

        let dates = events
            .into_iter()
            .map(|e| e.date)
            .filter(|d| year.is_none_or(|y| d.year() == y))
            .collect();

        Ok(Self { dates })
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The dates in calendar order.
    pub fn sorted(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.dates.iter().copied().collect();
        dates.sort_unstable();
        dates
    }
}

impl FromIterator<NaiveDate> for ExcludedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for ExcludedDates {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}

/// A date is a working day when it is Monday to Friday and not excluded.
pub fn is_working_day(date: NaiveDate, excluded: &ExcludedDates) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !excluded.contains(date)
}
