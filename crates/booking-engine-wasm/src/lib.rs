//! WASM bindings for booking-engine.
//!
//! Exposes leave day counting, leave overlap grouping and room booking
//! conflict checks to the intranet's JavaScript forms via `wasm-bindgen`.
//! Anything more complex than a number crosses the boundary as a JSON string.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/booking-engine/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{Booking, DateInterval, ExcludedDates, HalfDayFlags, LeaveRange, LeaveRequest};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    booking_engine::parse_booking_date(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A JSON array of `YYYY-MM-DD` strings, e.g. the bank holidays already
/// loaded by the page.
fn parse_excluded_json(json: &str) -> Result<ExcludedDates, JsValue> {
    let dates: Vec<NaiveDate> = from_json(json, "excluded dates JSON")?;
    Ok(dates.into_iter().collect())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Count the chargeable leave days between `start` and `end` inclusive.
///
/// # Arguments
/// - `start`, `end` -- `YYYY-MM-DD` or `DD/MM/YYYY`
/// - `excluded_json` -- JSON array of non-working `YYYY-MM-DD` dates
/// - `half_day_start`, `half_day_end` -- half-day boundary flags
#[wasm_bindgen(js_name = "workingDays")]
pub fn working_days(
    start: &str,
    end: &str,
    excluded_json: &str,
    half_day_start: bool,
    half_day_end: bool,
) -> Result<f64, JsValue> {
    let interval = DateInterval::new(parse_date(start)?, parse_date(end)?);
    let excluded = parse_excluded_json(excluded_json)?;
    let half_day = HalfDayFlags {
        half_day_start,
        half_day_end,
    };

    Ok(booking_engine::working_days(&interval, &excluded, half_day))
}

/// Total chargeable days over every range of a multi-range leave form.
///
/// `ranges_json` is a JSON array of `{start, end, half_day_start?, half_day_end?}`.
#[wasm_bindgen(js_name = "totalWorkingDays")]
pub fn total_working_days(ranges_json: &str, excluded_json: &str) -> Result<f64, JsValue> {
    let ranges: Vec<LeaveRange> = from_json(ranges_json, "leave ranges JSON")?;
    let excluded = parse_excluded_json(excluded_json)?;

    Ok(booking_engine::total_working_days(&ranges, &excluded))
}

/// The days two ranges share, as a JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "overlapDays")]
pub fn overlap_days(
    a_start: &str,
    a_end: &str,
    b_start: &str,
    b_end: &str,
) -> Result<String, JsValue> {
    let a = DateInterval::new(parse_date(a_start)?, parse_date(a_end)?);
    let b = DateInterval::new(parse_date(b_start)?, parse_date(b_end)?);

    to_json(&booking_engine::overlap_days(&a, &b))
}

/// Group colleagues' leave overlapping the proposed ranges.
///
/// `proposed_json` is a JSON array of `{start, end}`; `roster_json` a JSON
/// array of `{person, start_date, end_date, status}` leave records. Returns a
/// JSON array of `{person, overlapping_ranges, aggregate_status}`.
#[wasm_bindgen(js_name = "groupLeaveConflicts")]
pub fn group_leave_conflicts(proposed_json: &str, roster_json: &str) -> Result<String, JsValue> {
    let proposed: Vec<DateInterval> = from_json(proposed_json, "proposed ranges JSON")?;
    let roster: Vec<LeaveRequest> = from_json(roster_json, "leave roster JSON")?;

    to_json(&booking_engine::group_conflicts(&proposed, &roster))
}

/// Check a proposed room booking against the existing bookings.
///
/// `bookings_json` may hold every booking the page knows about; it is narrowed
/// to the proposed room and date here. `day_end` (`HH:MM`) defaults to
/// 23:59:59. Returns `{has_conflict, conflict_end?, suggested_start?}`.
///
/// Throws if the proposed booking's duration is not positive.
#[wasm_bindgen(js_name = "checkBookingConflict")]
pub fn check_booking_conflict(
    proposed_json: &str,
    bookings_json: &str,
    day_end: Option<String>,
) -> Result<String, JsValue> {
    let proposed: Booking = from_json(proposed_json, "proposed booking JSON")?;
    let bookings: Vec<Booking> = from_json(bookings_json, "bookings JSON")?;
    proposed
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let day_end = match day_end.as_deref() {
        Some(raw) => booking_engine::parse_booking_time(raw)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => booking_engine::booking::end_of_day(),
    };

    let same_day = booking_engine::bookings_for_day(&bookings, proposed.resource, proposed.date);
    let result = booking_engine::check_conflict_until(&proposed, &same_day, day_end);

    to_json(&result)
}

/// Read a GOV.UK bank holidays document and return one division's dates as
/// a JSON array of `YYYY-MM-DD` strings, ready for `workingDays`.
#[wasm_bindgen(js_name = "bankHolidays")]
pub fn bank_holidays(
    feed_json: &str,
    division: &str,
    year: Option<i32>,
) -> Result<String, JsValue> {
    let excluded = ExcludedDates::from_gov_uk_json(feed_json, division, year)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&excluded.sorted())
}
