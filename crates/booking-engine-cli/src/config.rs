//! Settings shared by every subcommand.
//!
//! Resolved in order: built-in defaults, then the `--config` JSON file, then
//! `BOOKINGS_*` environment variables. Subcommand flags are applied on top by
//! the caller.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::booking::end_of_day;
use booking_engine::holidays::DEFAULT_DIVISION;
use booking_engine::{parse_booking_time, ExcludedDates};
use chrono::NaiveTime;
use serde::Deserialize;

/// On-disk form. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    day_end: Option<String>,
    bank_holidays: Option<PathBuf>,
    division: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Latest time a suggested booking may end.
    pub day_end: NaiveTime,
    /// GOV.UK bank holidays JSON file; no holidays when unset.
    pub bank_holidays: Option<PathBuf>,
    pub division: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_end: end_of_day(),
            bank_holidays: None,
            division: DEFAULT_DIVISION.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str::<FileConfig>(&raw)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => FileConfig::default(),
        };

        let mut config = Config::default();

        if let Some(raw) = env::var("BOOKINGS_DAY_END").ok().or(file.day_end) {
            config.day_end = parse_booking_time(&raw)
                .with_context(|| format!("Invalid day end time: {}", raw))?;
        }
        config.bank_holidays = env::var_os("BOOKINGS_BANK_HOLIDAYS")
            .map(PathBuf::from)
            .or(file.bank_holidays);
        if let Some(division) = env::var("BOOKINGS_DIVISION").ok().or(file.division) {
            config.division = division;
        }

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Load the configured bank holidays, or an empty set.
    pub fn excluded_dates(&self) -> Result<ExcludedDates> {
        let Some(path) = &self.bank_holidays else {
            return Ok(ExcludedDates::new());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bank holidays: {}", path.display()))?;
        let excluded = ExcludedDates::from_gov_uk_json(&json, &self.division, None)
            .with_context(|| format!("Failed to load bank holidays from {}", path.display()))?;

        tracing::debug!(count = excluded.len(), division = %self.division, "bank holidays loaded");
        Ok(excluded)
    }
}
