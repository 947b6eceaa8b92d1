//! # booking-engine
//!
//! Leave day counting, leave overlap grouping and room booking conflict
//! resolution for the office intranet.
//!
//! Every calculation here is a pure function of its arguments: the forms call
//! them on each edit and render whatever comes back. Fetching rosters, bank
//! holidays and bookings, and persisting confirmed requests, happen elsewhere.
//!
//! ## Modules
//!
//! - [`interval`]: Inclusive date ranges and their overlap
//! - [`holidays`]: Bank holiday sets and the working-day test
//! - [`working_days`]: Chargeable leave days with half-day adjustments
//! - [`leave`]: Group colleagues' leave that overlaps a proposed request
//! - [`booking`]: Room booking conflicts and next free slot
//! - [`parse`]: Lenient form date/time parsing
//! - [`error`]: Error types

pub mod booking;
pub mod error;
pub mod holidays;
pub mod interval;
pub mod leave;
pub mod parse;
pub mod working_days;

pub use booking::{
    bookings_for_day, check_conflict, check_conflict_until, find_next_available_slot,
    start_falls_inside, Booking, BookingConflictResult, ResourceType,
};
pub use error::BookingError;
pub use holidays::{is_working_day, ExcludedDates};
pub use interval::{overlap, overlap_days, DateInterval};
pub use leave::{group_conflicts, ConflictGroup, LeaveRequest, LeaveStatus, PersonId};
pub use parse::{parse_booking_date, parse_booking_time};
pub use working_days::{total_working_days, working_days, HalfDayFlags, LeaveRange};
