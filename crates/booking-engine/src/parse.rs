//! Lenient date and time parsing for form input.
//!
//! The booking form's date picker produces `YYYY-MM-DD` or `DD/MM/YYYY`
//! depending on locale, and the time field produces `HH:MM` or `HH:MM:SS`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

use crate::error::{BookingError, Result};

/// Parse a booking date in `YYYY-MM-DD` or `DD/MM/YYYY` form.
pub fn parse_booking_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let format = if s.contains('/') { "%d/%m/%Y" } else { "%Y-%m-%d" };
    NaiveDate::parse_from_str(s, format).map_err(|_| BookingError::InvalidDate(s.to_string()))
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_booking_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| BookingError::InvalidTime(s.to_string()))
}

/// Booking ids arrive as strings from the form and as integers from the
/// database feed. Both are kept as text; a missing or null id becomes empty.
pub(crate) fn deserialize_id<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(d)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

pub(crate) fn deserialize_date<'de, D>(d: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_booking_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_time<'de, D>(d: D) -> std::result::Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_booking_time(&raw).map_err(serde::de::Error::custom)
}
