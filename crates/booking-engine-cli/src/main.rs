//! `bookings` CLI: run the leave and room booking calculations from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Chargeable days for a leave request
//! bookings working-days --start 2024-06-03 --end 2024-06-07 --half-day-end
//!
//! # Same, skipping bank holidays from the GOV.UK feed
//! bookings working-days --start 2024-05-24 --end 2024-05-31 --bank-holidays bank-holidays.json
//!
//! # Colleagues whose leave overlaps a request
//! bookings leave-conflicts -i request.json
//!
//! # Check a boardroom booking and get the next free slot before 17:00
//! bookings check-booking -i booking.json --day-end 17:00
//!
//! # Who is on booked leave on a given day
//! bookings who-is-out --date 2024-07-03 -i roster.json
//! ```
//!
//! Inputs are read from stdin when `-i` is omitted, and results are written to
//! stdout unless `-o` is given.

mod config;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::leave::people_on_leave;
use booking_engine::{
    bookings_for_day, check_conflict_until, group_conflicts, parse_booking_date,
    parse_booking_time, working_days, Booking, DateInterval, HalfDayFlags, LeaveRequest,
};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "bookings",
    version,
    about = "Leave day counting, leave overlap and room booking conflict checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (day_end, bank_holidays, division)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count chargeable leave days in a date range
    WorkingDays {
        /// First day of leave (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, value_parser = parse_booking_date)]
        start: NaiveDate,
        /// Last day of leave (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, value_parser = parse_booking_date)]
        end: NaiveDate,
        /// Only the afternoon of the first day is taken
        #[arg(long)]
        half_day_start: bool,
        /// Only the morning of the last day is taken
        #[arg(long)]
        half_day_end: bool,
        /// GOV.UK bank holidays JSON file
        #[arg(long)]
        bank_holidays: Option<PathBuf>,
    },
    /// Group colleagues' leave that overlaps the proposed ranges
    LeaveConflicts {
        /// Input JSON: {"proposed": [...], "roster": [...]} (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a room booking for conflicts and suggest the next free slot
    CheckBooking {
        /// Input JSON: {"proposed": {...}, "bookings": [...]} (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Latest time a suggested booking may end (HH:MM)
        #[arg(long, value_parser = parse_booking_time)]
        day_end: Option<NaiveTime>,
    },
    /// List people on booked leave on a date
    WhoIsOut {
        /// The day to check (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, value_parser = parse_booking_date)]
        date: NaiveDate,
        /// Input JSON array of leave records (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct LeaveConflictInput {
    proposed: Vec<DateInterval>,
    #[serde(default)]
    roster: Vec<LeaveRequest>,
}

#[derive(Deserialize)]
struct CheckBookingInput {
    proposed: Booking,
    #[serde(default)]
    bookings: Vec<Booking>,
}

#[derive(Serialize)]
struct WhoIsOutOutput {
    date: NaiveDate,
    people: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::WorkingDays {
            start,
            end,
            half_day_start,
            half_day_end,
            bank_holidays,
        } => {
            let config = Config {
                bank_holidays: bank_holidays.or(config.bank_holidays),
                ..config
            };
            let excluded = config.excluded_dates()?;
            let half_day = HalfDayFlags {
                half_day_start,
                half_day_end,
            };

            let days = working_days(&DateInterval::new(start, end), &excluded, half_day);
            println!("{:.1}", days);
        }
        Commands::LeaveConflicts { input, output } => {
            let raw = read_input(input.as_deref())?;
            let request: LeaveConflictInput =
                serde_json::from_str(&raw).context("Invalid leave conflict input")?;

            let groups = group_conflicts(&request.proposed, &request.roster);
            write_json(output.as_deref(), &groups)?;
        }
        Commands::CheckBooking {
            input,
            output,
            day_end,
        } => {
            let raw = read_input(input.as_deref())?;
            let request: CheckBookingInput =
                serde_json::from_str(&raw).context("Invalid booking input")?;
            request
                .proposed
                .validate()
                .context("Proposed booking is not valid")?;

            let same_day = bookings_for_day(
                &request.bookings,
                request.proposed.resource,
                request.proposed.date,
            );
            let day_end = day_end.unwrap_or(config.day_end);

            let result = check_conflict_until(&request.proposed, &same_day, day_end);
            write_json(output.as_deref(), &result)?;
        }
        Commands::WhoIsOut {
            date,
            input,
            output,
        } => {
            let raw = read_input(input.as_deref())?;
            let roster: Vec<LeaveRequest> =
                serde_json::from_str(&raw).context("Invalid leave roster")?;

            let people = people_on_leave(&roster, date)
                .into_iter()
                .map(|p| p.0)
                .collect();
            write_json(output.as_deref(), &WhoIsOutOutput { date, people })?;
        }
    }

    Ok(())
}

/// Log to stderr so JSON on stdout stays clean. `RUST_LOG` applies unless
/// `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
