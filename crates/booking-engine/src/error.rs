//! Error types for booking-engine input handling.
//!
//! The calculators themselves never fail. These errors come from parsing and
//! validating caller input before it reaches them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0} hours (must be a positive number)")]
    InvalidDuration(f64),

    #[error("Unknown leave status: {0}")]
    UnknownStatus(String),

    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    #[error("Bank holiday feed has no division named '{0}'")]
    UnknownDivision(String),

    #[error("Bank holiday feed error: {0}")]
    BankHolidays(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
